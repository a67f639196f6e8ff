//! Budget progress and alert views

use tabled::Tabled;

use super::format::{format_bar, format_percentage, truncate, DisplayOptions};
use super::{render_table, TerminalView, BAR_WIDTH};
use crate::models::{AlertType, Money};
use crate::reports::{BudgetProgress, BudgetStatus, TriggeredAlert};

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Budgeted")]
    budgeted: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
    #[tabled(rename = "Used")]
    used: String,
    #[tabled(rename = "Status")]
    status: String,
}

#[derive(Tabled)]
struct AlertRow {
    #[tabled(rename = "Budget")]
    budget: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Threshold")]
    threshold: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Used")]
    used: String,
    #[tabled(rename = "Level")]
    level: String,
}

fn status_marker(status: BudgetStatus) -> &'static str {
    match status {
        BudgetStatus::OnTrack => "✓",
        BudgetStatus::Warning => "!",
        BudgetStatus::OverBudget => "✗",
    }
}

impl TerminalView for BudgetProgress {
    fn format_terminal(&self, opts: &DisplayOptions) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{} ({})\n",
            self.budget_name,
            opts.range(&self.range)
        ));
        output.push_str(&format!(
            "Spent {} of {} ({}), {} {}\n",
            opts.money(self.total_spent),
            opts.money(self.total_budgeted),
            format_percentage(self.percentage_used),
            opts.money(self.total_remaining.abs()),
            if self.total_remaining.is_negative() {
                "over"
            } else {
                "left"
            }
        ));
        output.push_str(&format!(
            "{} {} {}\n",
            format_bar(self.percentage_used, BAR_WIDTH),
            status_marker(self.status),
            self.status
        ));

        if self.per_category.is_empty() {
            output.push_str("No category allocations.\n");
            return output;
        }

        let rows: Vec<CategoryRow> = self
            .per_category
            .values()
            .map(|c| CategoryRow {
                category: truncate(&c.label, 30),
                budgeted: opts.money(c.budgeted),
                spent: opts.money(c.spent),
                remaining: opts.money(c.remaining),
                used: format_percentage(c.percentage),
                status: format!("{} {}", status_marker(c.status), c.status),
            })
            .collect();

        output.push('\n');
        output.push_str(&render_table(rows, 1..5));
        output.push('\n');

        let over: Vec<&str> = self
            .over_budget_categories()
            .into_iter()
            .map(|c| c.label.as_str())
            .collect();
        if !over.is_empty() {
            output.push_str(&format!("Over budget: {}\n", over.join(", ")));
        }
        output
    }
}

impl TerminalView for Vec<BudgetProgress> {
    fn format_terminal(&self, opts: &DisplayOptions) -> String {
        if self.is_empty() {
            return "No budgets found.\n".to_string();
        }

        self.iter()
            .map(|progress| progress.format_terminal(opts))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl TerminalView for Vec<TriggeredAlert> {
    fn format_terminal(&self, opts: &DisplayOptions) -> String {
        if self.is_empty() {
            return "No alerts triggered.\n".to_string();
        }

        let rows: Vec<AlertRow> = self
            .iter()
            .map(|a| AlertRow {
                budget: truncate(&a.budget_name, 24),
                category: truncate(&a.category_label, 24),
                threshold: match a.alert_type {
                    AlertType::Percentage => format_percentage(a.threshold),
                    AlertType::Amount => opts.money(Money::new(a.threshold)),
                },
                spent: opts.money(a.spent),
                used: format_percentage(a.percentage),
                level: a.level.to_string(),
            })
            .collect();

        format!(
            "{} alert(s) triggered\n{}\n",
            self.len(),
            render_table(rows, 2..5)
        )
    }
}
