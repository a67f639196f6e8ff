//! CSV Export functionality
//!
//! One row per line item. Money is written as a plain decimal and
//! percentages are rounded to two places.

use std::collections::BTreeMap;
use std::io::Write;

use ::csv::{Writer, WriterBuilder};
use rust_decimal::Decimal;
use serde::Serialize;

use super::Report;
use crate::error::{SpendwiseError, SpendwiseResult};
use crate::models::{AlertType, Money};
use crate::reports::{
    BudgetProgress, CategoryBreakdown, CategoryBucket, DashboardTotals, Insight, MonthlySummary,
    TriggeredAlert,
};

/// Export a report as CSV
pub fn export_csv<R: Report, W: Write>(report: &R, writer: &mut W) -> SpendwiseResult<()> {
    let mut csv = WriterBuilder::new().has_headers(true).from_writer(writer);
    report
        .write_rows(&mut csv)
        .map_err(|e| SpendwiseError::Export(e.to_string()))?;
    csv.flush()
        .map_err(|e| SpendwiseError::Export(e.to_string()))?;
    Ok(())
}

fn pct(value: Decimal) -> Decimal {
    value.round_dp(2)
}

#[derive(Serialize)]
struct ProgressRow<'a> {
    budget_id: i64,
    budget: &'a str,
    start_date: String,
    end_date: String,
    /// Empty for the budget's own total row
    category: &'a str,
    budgeted: Money,
    spent: Money,
    remaining: Money,
    percentage: Decimal,
    status: &'static str,
}

impl Report for Vec<BudgetProgress> {
    fn kind(&self) -> &'static str {
        "budget_progress"
    }

    fn write_rows<W: Write>(&self, writer: &mut Writer<W>) -> ::csv::Result<()> {
        for progress in self {
            let start_date = progress.range.start.to_string();
            let end_date = progress.range.end.to_string();

            writer.serialize(ProgressRow {
                budget_id: progress.budget_id.get(),
                budget: &progress.budget_name,
                start_date: start_date.clone(),
                end_date: end_date.clone(),
                category: "",
                budgeted: progress.total_budgeted,
                spent: progress.total_spent,
                remaining: progress.total_remaining,
                percentage: pct(progress.percentage_used),
                status: progress.status.as_str(),
            })?;

            for category in progress.per_category.values() {
                writer.serialize(ProgressRow {
                    budget_id: progress.budget_id.get(),
                    budget: &progress.budget_name,
                    start_date: start_date.clone(),
                    end_date: end_date.clone(),
                    category: &category.label,
                    budgeted: category.budgeted,
                    spent: category.spent,
                    remaining: category.remaining,
                    percentage: pct(category.percentage),
                    status: category.status.as_str(),
                })?;
            }
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct DashboardRow {
    start_date: String,
    end_date: String,
    total_income: Money,
    total_expenses: Money,
    net_balance: Money,
    savings_rate: Decimal,
    income_count: usize,
    expense_count: usize,
}

impl Report for DashboardTotals {
    fn kind(&self) -> &'static str {
        "dashboard"
    }

    fn write_rows<W: Write>(&self, writer: &mut Writer<W>) -> ::csv::Result<()> {
        writer.serialize(DashboardRow {
            start_date: self.range.start.to_string(),
            end_date: self.range.end.to_string(),
            total_income: self.total_income,
            total_expenses: self.total_expenses,
            net_balance: self.net_balance,
            savings_rate: pct(self.savings_rate),
            income_count: self.income_count,
            expense_count: self.expense_count,
        })
    }
}

#[derive(Serialize)]
struct ShareRow<'a> {
    category: &'a str,
    category_id: Option<i64>,
    total: Money,
    transaction_count: usize,
    share: Decimal,
}

impl Report for CategoryBreakdown {
    fn kind(&self) -> &'static str {
        "category_breakdown"
    }

    fn write_rows<W: Write>(&self, writer: &mut Writer<W>) -> ::csv::Result<()> {
        for category in &self.categories {
            writer.serialize(ShareRow {
                category: &category.label,
                category_id: category.category_id.map(|id| id.get()),
                total: category.total,
                transaction_count: category.transaction_count,
                share: pct(category.share),
            })?;
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct GroupRow<'a> {
    category: &'a str,
    transaction_id: i64,
    date: String,
    kind: &'static str,
    amount: Money,
}

impl Report for BTreeMap<String, CategoryBucket<'_>> {
    fn kind(&self) -> &'static str {
        "category_groups"
    }

    fn write_rows<W: Write>(&self, writer: &mut Writer<W>) -> ::csv::Result<()> {
        for (label, bucket) in self {
            for txn in &bucket.transactions {
                writer.serialize(GroupRow {
                    category: label,
                    transaction_id: txn.id.get(),
                    date: txn.date.to_string(),
                    kind: txn.kind.as_str(),
                    amount: txn.magnitude(),
                })?;
            }
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct InsightRow<'a> {
    kind: &'static str,
    tone: &'static str,
    title: &'a str,
    message: &'a str,
    percentage: Option<Decimal>,
}

impl Report for Vec<Insight> {
    fn kind(&self) -> &'static str {
        "insights"
    }

    fn write_rows<W: Write>(&self, writer: &mut Writer<W>) -> ::csv::Result<()> {
        for insight in self {
            writer.serialize(InsightRow {
                kind: insight.kind.as_str(),
                tone: insight.tone.as_str(),
                title: &insight.title,
                message: &insight.message,
                percentage: insight.percentage.map(pct),
            })?;
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct AlertRow<'a> {
    alert_id: i64,
    budget: &'a str,
    category: &'a str,
    alert_type: AlertType,
    threshold: Decimal,
    spent: Money,
    budgeted: Money,
    percentage: Decimal,
    level: &'static str,
}

impl Report for Vec<TriggeredAlert> {
    fn kind(&self) -> &'static str {
        "alerts"
    }

    fn write_rows<W: Write>(&self, writer: &mut Writer<W>) -> ::csv::Result<()> {
        for alert in self {
            writer.serialize(AlertRow {
                alert_id: alert.alert_id.get(),
                budget: &alert.budget_name,
                category: &alert.category_label,
                alert_type: alert.alert_type,
                threshold: alert.threshold,
                spent: alert.spent,
                budgeted: alert.budgeted,
                percentage: pct(alert.percentage),
                level: alert.level.as_str(),
            })?;
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct MonthRow<'a> {
    month: String,
    label: &'a str,
    income: Money,
    expenses: Money,
    savings: Money,
    savings_rate: Decimal,
}

impl Report for Vec<MonthlySummary> {
    fn kind(&self) -> &'static str {
        "monthly"
    }

    fn write_rows<W: Write>(&self, writer: &mut Writer<W>) -> ::csv::Result<()> {
        for month in self {
            writer.serialize(MonthRow {
                month: format!("{}-{:02}", month.year, month.month),
                label: &month.label,
                income: month.income,
                expenses: month.expenses,
                savings: month.savings,
                savings_rate: pct(month.savings_rate),
            })?;
        }
        Ok(())
    }
}
