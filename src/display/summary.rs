//! Dashboard, category, insight and monthly views

use std::collections::BTreeMap;

use tabled::Tabled;

use super::format::{format_bar, format_percentage, separator, truncate, DisplayOptions};
use super::{render_table, TerminalView, BAR_WIDTH};
use crate::models::Money;
use crate::reports::{
    CategoryBreakdown, CategoryBucket, DashboardTotals, Insight, InsightTone, MonthlySummary,
};

#[derive(Tabled)]
struct ShareRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Count")]
    count: usize,
    #[tabled(rename = "Share")]
    share: String,
    #[tabled(rename = "")]
    bar: String,
}

#[derive(Tabled)]
struct GroupRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "Transactions")]
    count: usize,
}

#[derive(Tabled)]
struct MonthRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Income")]
    income: String,
    #[tabled(rename = "Expenses")]
    expenses: String,
    #[tabled(rename = "Savings")]
    savings: String,
    #[tabled(rename = "Rate")]
    rate: String,
}

impl TerminalView for DashboardTotals {
    fn format_terminal(&self, opts: &DisplayOptions) -> String {
        let mut output = String::new();
        output.push_str(&format!("Dashboard: {}\n", opts.range(&self.range)));
        output.push_str(&separator(40));
        output.push('\n');
        output.push_str(&format!(
            "{:<16}{:>24}\n",
            format!("Income ({})", self.income_count),
            opts.money(self.total_income)
        ));
        output.push_str(&format!(
            "{:<16}{:>24}\n",
            format!("Expenses ({})", self.expense_count),
            opts.money(self.total_expenses)
        ));
        output.push_str(&format!(
            "{:<16}{:>24}\n",
            "Net balance",
            opts.money(self.net_balance)
        ));
        output.push_str(&format!(
            "{:<16}{:>24}\n",
            "Savings rate",
            format_percentage(self.savings_rate)
        ));
        output
    }
}

impl TerminalView for CategoryBreakdown {
    fn format_terminal(&self, opts: &DisplayOptions) -> String {
        let mut output = format!(
            "Spending by category: {}\nTotal: {}\n",
            opts.range(&self.range),
            opts.money(self.total_spending)
        );

        if self.categories.is_empty() {
            output.push_str("No spending in this period.\n");
            return output;
        }

        let rows: Vec<ShareRow> = self
            .categories
            .iter()
            .map(|c| ShareRow {
                category: truncate(&c.label, 30),
                amount: opts.money(c.total),
                count: c.transaction_count,
                share: format_percentage(c.share),
                bar: format_bar(c.share, BAR_WIDTH / 2),
            })
            .collect();

        output.push_str(&render_table(rows, 1..4));
        output.push('\n');

        if let Some(largest) = self.largest() {
            output.push_str(&format!(
                "Largest: {} ({} of spending)\n",
                largest.label,
                format_percentage(largest.share)
            ));
        }
        output
    }
}

impl TerminalView for BTreeMap<String, CategoryBucket<'_>> {
    fn format_terminal(&self, opts: &DisplayOptions) -> String {
        if self.is_empty() {
            return "No transactions found.\n".to_string();
        }

        let total: Money = self.values().map(|b| b.total).sum();
        let rows: Vec<GroupRow> = self
            .iter()
            .map(|(label, bucket)| GroupRow {
                category: truncate(label, 30),
                total: opts.money(bucket.total),
                count: bucket.transactions.len(),
            })
            .collect();

        format!("{}\nTotal: {}\n", render_table(rows, 1..3), opts.money(total))
    }
}

fn tone_marker(tone: InsightTone) -> &'static str {
    match tone {
        InsightTone::Warning => "⚠",
        InsightTone::Positive => "✓",
        InsightTone::Info => "ℹ",
    }
}

impl TerminalView for Vec<Insight> {
    fn format_terminal(&self, _opts: &DisplayOptions) -> String {
        if self.is_empty() {
            return "No insights yet. Add some transactions first.\n".to_string();
        }

        self.iter()
            .map(|insight| {
                format!(
                    "{} {}\n  {}\n",
                    tone_marker(insight.tone),
                    insight.title,
                    insight.message
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl TerminalView for Vec<MonthlySummary> {
    fn format_terminal(&self, opts: &DisplayOptions) -> String {
        if self.is_empty() {
            return "No months in range.\n".to_string();
        }

        let rows: Vec<MonthRow> = self
            .iter()
            .map(|m| MonthRow {
                month: m.label.clone(),
                income: opts.money(m.income),
                expenses: opts.money(m.expenses),
                savings: opts.money(m.savings),
                rate: format_percentage(m.savings_rate),
            })
            .collect();

        format!("{}\n", render_table(rows, 1..5))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DateRange, Transaction, TransactionId};
    use crate::models::{CategoryId, CategoryRef};
    use crate::reports::{
        category_breakdown, compute_dashboard_totals, group_by_category, monthly_summary,
    };
    use chrono::NaiveDate;

    fn sample() -> Vec<Transaction> {
        let day = |d| NaiveDate::from_ymd_opt(2024, 6, d).unwrap();
        vec![
            Transaction::income(TransactionId::new(1), day(1), Money::from_units(3000)),
            Transaction::expense(TransactionId::new(2), day(3), Money::from_units(2100)),
        ]
    }

    #[test]
    fn test_dashboard_view() {
        let totals = compute_dashboard_totals(&sample(), &DateRange::month(2024, 6).unwrap());
        let output = totals.format_terminal(&DisplayOptions::default());

        assert!(output.contains("Dashboard: 2024-06-01 to 2024-06-30"));
        assert!(output.contains("$3000.00"));
        assert!(output.contains("$900.00"));
        assert!(output.contains("30%"));
    }

    #[test]
    fn test_category_groups_view() {
        let transactions = sample();
        let output = group_by_category(&transactions).format_terminal(&DisplayOptions::default());

        assert!(output.contains("Uncategorized"));
        assert!(output.contains("Total: $5100.00"));
    }

    #[test]
    fn test_breakdown_view_names_largest() {
        let day = NaiveDate::from_ymd_opt(2024, 6, 5).unwrap();
        let transactions = vec![
            Transaction::expense(TransactionId::new(1), day, Money::from_units(75))
                .with_category(CategoryRef::named(CategoryId::new(1), "Rent")),
            Transaction::expense(TransactionId::new(2), day, Money::from_units(25))
                .with_category(CategoryRef::named(CategoryId::new(2), "Food")),
        ];
        let breakdown = category_breakdown(&transactions, &DateRange::month(2024, 6).unwrap());

        let output = breakdown.format_terminal(&DisplayOptions::default());

        assert!(output.contains("Total: $100.00"));
        assert!(output.contains("Largest: Rent (75% of spending)"));
    }

    #[test]
    fn test_monthly_view() {
        let range = DateRange::month(2024, 6).unwrap();
        let output = monthly_summary(&sample(), &range).format_terminal(&DisplayOptions::default());

        assert!(output.contains("June 2024"));
        assert!(output.contains("$900.00"));
    }

    #[test]
    fn test_empty_insights() {
        let output = Vec::<Insight>::new().format_terminal(&DisplayOptions::default());
        assert!(output.starts_with("No insights"));
    }
}
