//! Dashboard Totals
//!
//! Income, expenses, net balance and savings rate for a date range.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{DateRange, Money, Transaction, TransactionKind};

/// Headline figures for the dashboard cards
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardTotals {
    /// The range these totals cover
    pub range: DateRange,
    /// Sum of income amounts
    pub total_income: Money,
    /// Sum of expense magnitudes
    pub total_expenses: Money,
    /// Income minus expenses
    pub net_balance: Money,
    /// Net balance as a percentage of income; zero without income
    pub savings_rate: Decimal,
    /// Number of income transactions in range
    pub income_count: usize,
    /// Number of expense transactions in range
    pub expense_count: usize,
}

/// Compute dashboard totals over `range` (inclusive).
///
/// Transfers are ignored. A range without income has a savings rate of zero.
pub fn compute_dashboard_totals(transactions: &[Transaction], range: &DateRange) -> DashboardTotals {
    let mut total_income = Money::zero();
    let mut total_expenses = Money::zero();
    let mut income_count = 0;
    let mut expense_count = 0;

    for txn in transactions.iter().filter(|t| t.is_within(range)) {
        match txn.kind {
            TransactionKind::Income => {
                total_income += txn.amount;
                income_count += 1;
            }
            TransactionKind::Expense => {
                total_expenses += txn.magnitude();
                expense_count += 1;
            }
            TransactionKind::Transfer => {}
        }
    }

    let net_balance = total_income - total_expenses;

    DashboardTotals {
        range: *range,
        total_income,
        total_expenses,
        net_balance,
        savings_rate: net_balance.percent_of(total_income),
        income_count,
        expense_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionId;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn june() -> DateRange {
        DateRange::month(2024, 6).unwrap()
    }

    #[test]
    fn test_totals_and_savings_rate() {
        let transactions = vec![
            Transaction::income(TransactionId::new(1), date(2024, 6, 1), Money::from_units(3000)),
            Transaction::expense(TransactionId::new(2), date(2024, 6, 3), Money::from_units(1500)),
            Transaction::expense(TransactionId::new(3), date(2024, 6, 20), Money::from_units(-600)),
        ];

        let totals = compute_dashboard_totals(&transactions, &june());

        assert_eq!(totals.total_income, Money::from_units(3000));
        assert_eq!(totals.total_expenses, Money::from_units(2100));
        assert_eq!(totals.net_balance, Money::from_units(900));
        assert_eq!(totals.savings_rate, dec!(30.0));
        assert_eq!(totals.income_count, 1);
        assert_eq!(totals.expense_count, 2);
    }

    #[test]
    fn test_no_income_means_zero_savings_rate() {
        let transactions = vec![Transaction::expense(
            TransactionId::new(1),
            date(2024, 6, 3),
            Money::from_units(500),
        )];

        let totals = compute_dashboard_totals(&transactions, &june());

        assert!(totals.total_income.is_zero());
        assert_eq!(totals.total_expenses, Money::from_units(500));
        assert_eq!(totals.net_balance, Money::from_units(-500));
        assert_eq!(totals.savings_rate, Decimal::ZERO);
    }

    #[test]
    fn test_range_and_transfers_filtered() {
        let transactions = vec![
            Transaction::income(TransactionId::new(1), date(2024, 5, 31), Money::from_units(999)),
            Transaction::income(TransactionId::new(2), date(2024, 6, 30), Money::from_units(1000)),
            Transaction::new(
                TransactionId::new(3),
                date(2024, 6, 10),
                Money::from_units(400),
                TransactionKind::Transfer,
            ),
        ];

        let totals = compute_dashboard_totals(&transactions, &june());

        assert_eq!(totals.total_income, Money::from_units(1000));
        assert!(totals.total_expenses.is_zero());
        assert_eq!(totals.savings_rate, dec!(100));
    }

    #[test]
    fn test_overspending_gives_negative_rate() {
        let transactions = vec![
            Transaction::income(TransactionId::new(1), date(2024, 6, 1), Money::from_units(1000)),
            Transaction::expense(TransactionId::new(2), date(2024, 6, 2), Money::from_units(1250)),
        ];

        let totals = compute_dashboard_totals(&transactions, &june());

        assert_eq!(totals.savings_rate, dec!(-25));
    }
}
