//! Budget Progress
//!
//! Measures spending against a budget and against each of its category
//! allocations. Pure computation over borrowed inputs: the same budget and
//! transactions always produce the same progress.

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::models::{Budget, BudgetId, CategoryId, DateRange, Money, Transaction};

/// Percentage used above which a budget is in `Warning`
pub const WARNING_THRESHOLD_PERCENT: Decimal = Decimal::from_parts(90, 0, 0, false, 0);

/// Status classification of a budget or an allocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    OnTrack,
    Warning,
    OverBudget,
}

impl BudgetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OnTrack => "on_track",
            Self::Warning => "warning",
            Self::OverBudget => "over_budget",
        }
    }
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OnTrack => write!(f, "On track"),
            Self::Warning => write!(f, "Warning"),
            Self::OverBudget => write!(f, "Over budget"),
        }
    }
}

/// Spent-vs-budgeted figures shared by budgets and allocations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Measure {
    spent: Money,
    budgeted: Money,
    remaining: Money,
    percentage: Decimal,
    is_over_budget: bool,
    status: BudgetStatus,
}

impl Measure {
    /// A budget that is zero or negative counts as "no budget set": nothing
    /// is used and nothing can be exceeded.
    fn new(spent: Money, budgeted: Money) -> Self {
        let remaining = budgeted - spent;
        let percentage = spent.percent_of(budgeted);
        let is_over_budget = budgeted.is_positive() && spent > budgeted;

        let status = if is_over_budget {
            BudgetStatus::OverBudget
        } else if percentage > WARNING_THRESHOLD_PERCENT {
            BudgetStatus::Warning
        } else {
            BudgetStatus::OnTrack
        };

        Self {
            spent,
            budgeted,
            remaining,
            percentage,
            is_over_budget,
            status,
        }
    }
}

/// Progress of one category allocation within a budget
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryProgress {
    /// Category ID
    pub category_id: CategoryId,
    /// Category display label
    pub label: String,
    /// Spent in this category within the budget range
    pub spent: Money,
    /// Allocated to this category
    pub budgeted: Money,
    /// Budgeted minus spent (may be negative)
    pub remaining: Money,
    /// Spent as a percentage of budgeted, unclipped
    pub percentage: Decimal,
    pub is_over_budget: bool,
    pub status: BudgetStatus,
}

/// Progress of a budget against the transactions in its range
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetProgress {
    /// Budget ID
    pub budget_id: BudgetId,
    /// Budget name
    pub budget_name: String,
    /// The inclusive range the budget covers
    pub range: DateRange,
    pub total_budgeted: Money,
    pub total_spent: Money,
    /// Budgeted minus spent (may be negative)
    pub total_remaining: Money,
    /// Spent as a percentage of budgeted, unclipped
    pub percentage_used: Decimal,
    pub is_over_budget: bool,
    pub status: BudgetStatus,
    /// One entry per allocated category
    pub per_category: BTreeMap<CategoryId, CategoryProgress>,
}

impl BudgetProgress {
    /// Look up the progress of one allocation
    pub fn category(&self, category_id: CategoryId) -> Option<&CategoryProgress> {
        self.per_category.get(&category_id)
    }

    /// Allocations whose spending exceeds their amount
    pub fn over_budget_categories(&self) -> Vec<&CategoryProgress> {
        self.per_category
            .values()
            .filter(|c| c.is_over_budget)
            .collect()
    }
}

/// Compute a budget's progress from a set of transactions.
///
/// Only `EXPENSE` transactions dated within `[start_date, end_date]` count;
/// their magnitudes are summed. Each allocation repeats the same measurement
/// restricted to its category. Allocations listed twice for the same
/// category are merged by adding their amounts.
pub fn compute_budget_progress(budget: &Budget, transactions: &[Transaction]) -> BudgetProgress {
    let range = budget.range();

    let mut total_spent = Money::zero();
    let mut spent_by_category: HashMap<CategoryId, Money> = HashMap::new();

    for txn in transactions
        .iter()
        .filter(|t| t.is_expense() && t.is_within(&range))
    {
        total_spent += txn.magnitude();
        if let Some(category_id) = txn.category_id() {
            *spent_by_category.entry(category_id).or_default() += txn.magnitude();
        }
    }

    let mut budgeted_by_category: BTreeMap<CategoryId, (String, Money)> = BTreeMap::new();
    for allocation in &budget.allocations {
        let entry = budgeted_by_category
            .entry(allocation.category_id())
            .or_insert_with(|| (allocation.category.label(), Money::zero()));
        entry.1 += allocation.amount;
    }

    let per_category = budgeted_by_category
        .into_iter()
        .map(|(category_id, (label, budgeted))| {
            let spent = spent_by_category
                .get(&category_id)
                .copied()
                .unwrap_or_default();
            let measure = Measure::new(spent, budgeted);
            let progress = CategoryProgress {
                category_id,
                label,
                spent: measure.spent,
                budgeted: measure.budgeted,
                remaining: measure.remaining,
                percentage: measure.percentage,
                is_over_budget: measure.is_over_budget,
                status: measure.status,
            };
            (category_id, progress)
        })
        .collect();

    let measure = Measure::new(total_spent, budget.total_amount);

    BudgetProgress {
        budget_id: budget.id,
        budget_name: budget.name.clone(),
        range,
        total_budgeted: measure.budgeted,
        total_spent: measure.spent,
        total_remaining: measure.remaining,
        percentage_used: measure.percentage,
        is_over_budget: measure.is_over_budget,
        status: measure.status,
        per_category,
    }
}

/// Compute progress for every budget, preserving the input order
pub fn compute_all_budget_progress(
    budgets: &[Budget],
    transactions: &[Transaction],
) -> Vec<BudgetProgress> {
    budgets
        .iter()
        .map(|budget| compute_budget_progress(budget, transactions))
        .collect()
}
