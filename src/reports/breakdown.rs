//! Category Breakdown
//!
//! Spending in a date range split by category, with each category's share of
//! the total. This is the data behind the dashboard's spending pie.

use rust_decimal::Decimal;
use serde::Serialize;

use super::category_groups::group_by_category_of_kind;
use crate::models::{CategoryId, DateRange, Money, Transaction, TransactionKind};

/// Spending for a single category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySpending {
    /// Category display label
    pub label: String,
    /// Category ID, when the transactions carried one
    pub category_id: Option<CategoryId>,
    /// Total spending (magnitude)
    pub total: Money,
    /// Number of transactions
    pub transaction_count: usize,
    /// Percentage of total spending
    pub share: Decimal,
}

/// Spending breakdown report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryBreakdown {
    /// The range covered
    pub range: DateRange,
    /// Total spending across all categories
    pub total_spending: Money,
    /// Categories, largest spending first
    pub categories: Vec<CategorySpending>,
}

impl CategoryBreakdown {
    /// The `limit` largest categories
    pub fn top(&self, limit: usize) -> &[CategorySpending] {
        &self.categories[..limit.min(self.categories.len())]
    }

    /// The largest category, if any spending happened
    pub fn largest(&self) -> Option<&CategorySpending> {
        self.categories.first()
    }
}

/// Break down expenses in `range` by category.
///
/// Ties on total are ordered by label so the output is stable.
pub fn category_breakdown(transactions: &[Transaction], range: &DateRange) -> CategoryBreakdown {
    let groups = group_by_category_of_kind(
        transactions.iter().filter(|t| t.is_within(range)),
        TransactionKind::Expense,
    );

    let total_spending: Money = groups.values().map(|g| g.total).sum();

    let mut categories: Vec<CategorySpending> = groups
        .into_iter()
        .map(|(label, bucket)| CategorySpending {
            category_id: bucket.transactions.iter().find_map(|t| t.category_id()),
            transaction_count: bucket.transactions.len(),
            share: bucket.total.percent_of(total_spending),
            total: bucket.total,
            label,
        })
        .collect();

    categories.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.label.cmp(&b.label)));

    CategoryBreakdown {
        range: *range,
        total_spending,
        categories,
    }
}
