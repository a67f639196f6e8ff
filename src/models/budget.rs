//! Budget model
//!
//! A budget is a spending ceiling over an inclusive date range, optionally
//! broken down into per-category allocations.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::CategoryRef;
use super::ids::{BudgetId, CategoryId};
use super::money::Money;
use super::period::{DateRange, PeriodType};

/// The part of a budget earmarked for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryAllocation {
    /// The category this allocation is for
    pub category: CategoryRef,

    /// Amount budgeted for the category within the budget's range
    pub amount: Money,
}

impl CategoryAllocation {
    pub fn new(category: CategoryRef, amount: Money) -> Self {
        Self { category, amount }
    }

    pub fn category_id(&self) -> CategoryId {
        self.category.id
    }
}

/// A budget over a date range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    /// Unique identifier
    pub id: BudgetId,

    /// Budget name
    pub name: String,

    /// Period type chosen at creation
    #[serde(default)]
    pub period_type: PeriodType,

    /// First day covered (inclusive)
    pub start_date: NaiveDate,

    /// Last day covered (inclusive)
    pub end_date: NaiveDate,

    /// Spending ceiling for the whole range
    pub total_amount: Money,

    /// Per-category allocations, in the order they were entered
    #[serde(default)]
    pub allocations: Vec<CategoryAllocation>,

    /// Inactive budgets are kept by the backend but hidden by default
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl Budget {
    /// Create a new budget with no allocations
    pub fn new(
        id: BudgetId,
        name: impl Into<String>,
        period_type: PeriodType,
        range: DateRange,
        total_amount: Money,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            period_type,
            start_date: range.start,
            end_date: range.end,
            total_amount,
            allocations: Vec::new(),
            is_active: true,
        }
    }

    /// Builder-style allocation
    pub fn with_allocation(mut self, category: CategoryRef, amount: Money) -> Self {
        self.allocations.push(CategoryAllocation::new(category, amount));
        self
    }

    /// The inclusive range this budget covers
    pub fn range(&self) -> DateRange {
        DateRange {
            start: self.start_date,
            end: self.end_date,
        }
    }

    /// Sum of all allocation amounts
    pub fn allocated(&self) -> Money {
        self.allocations.iter().map(|a| a.amount).sum()
    }

    /// Part of the total not earmarked for any category (negative when over-allocated)
    pub fn unallocated(&self) -> Money {
        self.total_amount - self.allocated()
    }

    /// Allocations add up to more than the total
    pub fn is_over_allocated(&self) -> bool {
        self.allocated() > self.total_amount
    }

    /// Find the allocation for a category
    pub fn allocation_for(&self, category_id: CategoryId) -> Option<&CategoryAllocation> {
        self.allocations
            .iter()
            .find(|a| a.category_id() == category_id)
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.period_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategoryId;

    fn january_budget() -> Budget {
        Budget::new(
            BudgetId::new(1),
            "January",
            PeriodType::Monthly,
            DateRange::month(2024, 1).unwrap(),
            Money::from_units(500),
        )
    }

    #[test]
    fn test_allocation_totals() {
        let budget = january_budget()
            .with_allocation(CategoryRef::named(CategoryId::new(1), "Food"), Money::from_units(300))
            .with_allocation(CategoryRef::by_id(CategoryId::new(2)), Money::from_units(150));

        assert_eq!(budget.allocated(), Money::from_units(450));
        assert_eq!(budget.unallocated(), Money::from_units(50));
        assert!(!budget.is_over_allocated());
        assert_eq!(
            budget.allocation_for(CategoryId::new(2)).map(|a| a.amount),
            Some(Money::from_units(150))
        );
        assert!(budget.allocation_for(CategoryId::new(3)).is_none());
    }

    #[test]
    fn test_over_allocation_is_reported_not_rejected() {
        let budget = january_budget()
            .with_allocation(CategoryRef::by_id(CategoryId::new(1)), Money::from_units(600));
        assert!(budget.is_over_allocated());
        assert_eq!(budget.unallocated(), Money::from_units(-100));
    }

    #[test]
    fn test_range_and_display() {
        let budget = january_budget();
        assert_eq!(budget.range(), DateRange::month(2024, 1).unwrap());
        assert_eq!(budget.to_string(), "January (Monthly)");
    }

    #[test]
    fn test_deserialize_defaults() {
        let json = r#"{
            "id": 4,
            "name": "Q1",
            "start_date": "2024-01-01",
            "end_date": "2024-03-31",
            "total_amount": "1500.00"
        }"#;
        let budget: Budget = serde_json::from_str(json).unwrap();
        assert!(budget.is_active);
        assert!(budget.allocations.is_empty());
        assert_eq!(budget.period_type, PeriodType::Monthly);
        assert_eq!(budget.total_amount, Money::from_units(1500));
    }
}
