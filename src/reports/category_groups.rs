//! Category grouping
//!
//! Buckets transactions by category label. The unfiltered variant mixes
//! income and expenses ("all activity by category"); callers that only want
//! one kind use `group_by_category_of_kind`.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::{Money, Transaction, TransactionKind};

/// Transactions sharing one category label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct CategoryBucket<'a> {
    /// Sum of transaction magnitudes
    pub total: Money,
    /// The transactions, in input order
    pub transactions: Vec<&'a Transaction>,
}

/// Group transactions by category label regardless of kind.
///
/// The label is the category name, `"Category <id>"` when only the id is
/// known, or `"Uncategorized"`.
pub fn group_by_category<'a, I>(transactions: I) -> BTreeMap<String, CategoryBucket<'a>>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut groups: BTreeMap<String, CategoryBucket<'a>> = BTreeMap::new();

    for txn in transactions {
        let bucket = groups.entry(txn.category_label()).or_default();
        bucket.total += txn.magnitude();
        bucket.transactions.push(txn);
    }

    groups
}

/// Group only the transactions of `kind` by category label
pub fn group_by_category_of_kind<'a, I>(
    transactions: I,
    kind: TransactionKind,
) -> BTreeMap<String, CategoryBucket<'a>>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    group_by_category(transactions.into_iter().filter(|t| t.kind == kind))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryId, CategoryRef, TransactionId};
    use chrono::NaiveDate;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    fn sample() -> Vec<Transaction> {
        let food = CategoryRef::named(CategoryId::new(1), "Food");
        vec![
            Transaction::expense(TransactionId::new(1), day(), Money::from_units(20))
                .with_category(food.clone()),
            Transaction::income(TransactionId::new(2), day(), Money::from_units(5))
                .with_category(food),
            Transaction::expense(TransactionId::new(3), day(), Money::from_units(-7))
                .with_category(CategoryRef::by_id(CategoryId::new(4))),
            Transaction::expense(TransactionId::new(4), day(), Money::from_units(3)),
        ]
    }

    #[test]
    fn test_unfiltered_mixes_kinds() {
        let transactions = sample();
        let groups = group_by_category(&transactions);

        assert_eq!(groups.len(), 3);
        assert_eq!(groups["Food"].total, Money::from_units(25));
        assert_eq!(groups["Food"].transactions.len(), 2);
        assert_eq!(groups["Category 4"].total, Money::from_units(7));
        assert_eq!(groups["Uncategorized"].total, Money::from_units(3));
    }

    #[test]
    fn test_kind_filtered() {
        let transactions = sample();

        let expenses = group_by_category_of_kind(&transactions, TransactionKind::Expense);
        assert_eq!(expenses["Food"].total, Money::from_units(20));
        assert_eq!(expenses.len(), 3);

        let income = group_by_category_of_kind(&transactions, TransactionKind::Income);
        assert_eq!(income.len(), 1);
        assert_eq!(income["Food"].total, Money::from_units(5));
        assert_eq!(income["Food"].transactions[0].id, TransactionId::new(2));
    }

    #[test]
    fn test_empty_input() {
        let transactions: Vec<Transaction> = Vec::new();
        assert!(group_by_category(&transactions).is_empty());
    }
}
