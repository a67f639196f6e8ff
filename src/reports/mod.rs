//! Reports module for Spendwise
//!
//! Pure aggregations over loaded transactions and budgets: budget progress,
//! dashboard totals, category grouping and breakdown, spending insights,
//! threshold alerts and the monthly trend.

pub mod alerts;
pub mod breakdown;
pub mod budget_progress;
pub mod category_groups;
pub mod dashboard;
pub mod insights;
pub mod monthly;

pub use alerts::{evaluate_alerts, AlertLevel, TriggeredAlert};
pub use breakdown::{category_breakdown, CategoryBreakdown, CategorySpending};
pub use budget_progress::{
    compute_all_budget_progress, compute_budget_progress, BudgetProgress, BudgetStatus,
    CategoryProgress, WARNING_THRESHOLD_PERCENT,
};
pub use category_groups::{group_by_category, group_by_category_of_kind, CategoryBucket};
pub use dashboard::{compute_dashboard_totals, DashboardTotals};
pub use insights::{spending_insights, Insight, InsightKind, InsightTone, MAX_INSIGHTS};
pub use monthly::{monthly_summary, MonthlySummary};

use rust_decimal::{Decimal, RoundingStrategy};

/// Round a percentage to a whole number for messages, halves away from zero
pub(crate) fn whole_percent(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}
