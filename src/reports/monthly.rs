//! Monthly Trend
//!
//! Income, expenses and savings per calendar month.

use rust_decimal::Decimal;
use serde::Serialize;

use super::dashboard::compute_dashboard_totals;
use crate::models::{DateRange, Money, Transaction};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlySummary {
    pub year: i32,
    pub month: u32,
    /// e.g. "March 2024"
    pub label: String,
    /// The part of the month inside the requested range
    pub range: DateRange,
    pub income: Money,
    pub expenses: Money,
    pub savings: Money,
    pub savings_rate: Decimal,
}

/// Summarize every calendar month touched by `range`, oldest first.
///
/// The first and last months are clipped to the range. Months without any
/// activity are still listed, with zero totals.
pub fn monthly_summary(transactions: &[Transaction], range: &DateRange) -> Vec<MonthlySummary> {
    range
        .months()
        .into_iter()
        .filter_map(|(year, month)| {
            let whole = DateRange::month(year, month)?;
            let clipped = DateRange {
                start: whole.start.max(range.start),
                end: whole.end.min(range.end),
            };
            let totals = compute_dashboard_totals(transactions, &clipped);

            Some(MonthlySummary {
                year,
                month,
                label: whole.start.format("%B %Y").to_string(),
                range: clipped,
                income: totals.total_income,
                expenses: totals.total_expenses,
                savings: totals.net_balance,
                savings_rate: totals.savings_rate,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionId;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    #[test]
    fn test_months_in_order_with_gaps() {
        let transactions = vec![
            Transaction::income(TransactionId::new(1), date(1, 5), Money::from_units(2000)),
            Transaction::expense(TransactionId::new(2), date(1, 9), Money::from_units(500)),
            Transaction::expense(TransactionId::new(3), date(3, 2), Money::from_units(40)),
        ];
        let range = DateRange::new(date(1, 1), date(3, 31)).unwrap();

        let months = monthly_summary(&transactions, &range);

        assert_eq!(months.len(), 3);
        assert_eq!(months[0].label, "January 2024");
        assert_eq!(months[0].savings, Money::from_units(1500));
        assert_eq!(months[0].savings_rate, dec!(75));

        assert_eq!(months[1].month, 2);
        assert!(months[1].income.is_zero());
        assert!(months[1].expenses.is_zero());
        assert_eq!(months[1].savings_rate, Decimal::ZERO);

        assert_eq!(months[2].expenses, Money::from_units(40));
        assert_eq!(months[2].savings, Money::from_units(-40));
    }

    #[test]
    fn test_partial_months_are_clipped() {
        let transactions = vec![
            Transaction::expense(TransactionId::new(1), date(1, 10), Money::from_units(10)),
            Transaction::expense(TransactionId::new(2), date(1, 20), Money::from_units(20)),
            Transaction::expense(TransactionId::new(3), date(2, 10), Money::from_units(30)),
            Transaction::expense(TransactionId::new(4), date(2, 20), Money::from_units(40)),
        ];
        let range = DateRange::new(date(1, 15), date(2, 15)).unwrap();

        let months = monthly_summary(&transactions, &range);

        assert_eq!(months.len(), 2);
        assert_eq!(months[0].range.start, date(1, 15));
        assert_eq!(months[0].expenses, Money::from_units(20));
        assert_eq!(months[1].range.end, date(2, 15));
        assert_eq!(months[1].expenses, Money::from_units(30));
    }
}
