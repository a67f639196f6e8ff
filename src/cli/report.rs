//! CLI commands for reports
//!
//! Every command works on an already loaded snapshot and prints a table,
//! or exports JSON, YAML or CSV.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use chrono::NaiveDate;
use clap::{Subcommand, ValueEnum};

use super::args::{parse_date, trailing_months, OutputArgs, RangeArgs};
use crate::config::Session;
use crate::data::Snapshot;
use crate::display::{DisplayOptions, TerminalView};
use crate::error::{SpendwiseError, SpendwiseResult};
use crate::export::{export_report, Report};
use crate::models::{BudgetId, TransactionKind};
use crate::reports::{
    category_breakdown, compute_all_budget_progress, compute_budget_progress,
    compute_dashboard_totals, evaluate_alerts, group_by_category, group_by_category_of_kind,
    monthly_summary, spending_insights,
};

/// Which transactions `categories` groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum KindFilter {
    Income,
    #[default]
    Expense,
    All,
}

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Show spending against budgets
    Progress {
        /// Budget ID (defaults to every active budget)
        budget_id: Option<String>,

        /// Include inactive budgets
        #[arg(short, long)]
        all: bool,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show income, expenses and savings rate for a period
    #[command(alias = "summary")]
    Dashboard {
        #[command(flatten)]
        range: RangeArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Group transactions by category
    Categories {
        /// Transaction kind to include
        #[arg(short, long, value_enum, default_value_t = KindFilter::Expense)]
        kind: KindFilter,

        #[command(flatten)]
        range: RangeArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show each category's share of spending
    #[command(alias = "spending")]
    Breakdown {
        #[command(flatten)]
        range: RangeArgs,

        /// Show top N categories only
        #[arg(long)]
        top: Option<usize>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Highlight notable spending patterns
    Insights {
        /// Date the weekly comparison ends on (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        today: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show budget alerts that have been reached
    Alerts {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show income and spending per month
    #[command(alias = "trend")]
    Monthly {
        /// Number of months ending with the current one
        #[arg(short, long, default_value_t = 6)]
        months: u32,

        #[command(flatten)]
        range: RangeArgs,

        #[command(flatten)]
        output: OutputArgs,
    },
}

/// Handle report commands
pub fn handle_report_command(
    snapshot: &Snapshot,
    session: &Session,
    cmd: ReportCommands,
    today: NaiveDate,
) -> SpendwiseResult<()> {
    let opts = DisplayOptions::from(session);
    let default_range = session.default_period.range_containing(today);

    match cmd {
        ReportCommands::Progress {
            budget_id,
            all,
            output,
        } => {
            let progress = match budget_id {
                Some(id) => {
                    let id = BudgetId::parse(&id)
                        .map_err(|_| SpendwiseError::budget_not_found(id.clone()))?;
                    let budget = snapshot
                        .budget(id)
                        .ok_or_else(|| SpendwiseError::budget_not_found(id.to_string()))?;
                    vec![compute_budget_progress(budget, &snapshot.transactions)]
                }
                None if all => compute_all_budget_progress(&snapshot.budgets, &snapshot.transactions),
                None => {
                    compute_all_budget_progress(&snapshot.active_budgets(), &snapshot.transactions)
                }
            };
            emit(&progress, &opts, &output)
        }

        ReportCommands::Dashboard { range, output } => {
            let range = range.resolve(default_range)?;
            emit(
                &compute_dashboard_totals(&snapshot.transactions, &range),
                &opts,
                &output,
            )
        }

        ReportCommands::Categories {
            kind,
            range,
            output,
        } => {
            let range = range.resolve(default_range)?;
            let in_range = snapshot.transactions.iter().filter(|t| t.is_within(&range));
            let groups = match kind {
                KindFilter::Income => group_by_category_of_kind(in_range, TransactionKind::Income),
                KindFilter::Expense => {
                    group_by_category_of_kind(in_range, TransactionKind::Expense)
                }
                KindFilter::All => group_by_category(in_range),
            };
            emit(&groups, &opts, &output)
        }

        ReportCommands::Breakdown { range, top, output } => {
            let range = range.resolve(default_range)?;
            let mut breakdown = category_breakdown(&snapshot.transactions, &range);
            if let Some(limit) = top {
                breakdown.categories = breakdown.top(limit).to_vec();
            }
            emit(&breakdown, &opts, &output)
        }

        ReportCommands::Insights {
            today: as_of,
            output,
        } => {
            let as_of = match as_of {
                Some(s) => parse_date(&s, "today")?,
                None => today,
            };
            emit(
                &spending_insights(&snapshot.transactions, as_of),
                &opts,
                &output,
            )
        }

        ReportCommands::Alerts { output } => {
            let progress =
                compute_all_budget_progress(&snapshot.budgets, &snapshot.transactions);
            emit(&evaluate_alerts(&progress, &snapshot.alerts), &opts, &output)
        }

        ReportCommands::Monthly {
            months,
            range,
            output,
        } => {
            let range = range.resolve(trailing_months(today, months))?;
            emit(
                &monthly_summary(&snapshot.transactions, &range),
                &opts,
                &output,
            )
        }
    }
}

/// Print or export a report
fn emit<R>(report: &R, opts: &DisplayOptions, output: &OutputArgs) -> SpendwiseResult<()>
where
    R: Report + TerminalView,
{
    match &output.output {
        Some(path) => {
            let mut writer = BufWriter::new(create_file(path)?);
            write_report(report, opts, output, &mut writer)?;
            writer.flush()?;
            println!("Report written to: {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            write_report(report, opts, output, &mut writer)?;
            writer.flush()?;
        }
    }
    Ok(())
}

fn write_report<R, W>(
    report: &R,
    opts: &DisplayOptions,
    output: &OutputArgs,
    writer: &mut W,
) -> SpendwiseResult<()>
where
    R: Report + TerminalView,
    W: Write,
{
    match output.format.export_format() {
        Some(format) => export_report(report, format, writer),
        None => {
            write!(writer, "{}", report.format_terminal(opts))?;
            Ok(())
        }
    }
}

fn create_file(path: &Path) -> SpendwiseResult<File> {
    File::create(path).map_err(|e| {
        SpendwiseError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::OutputFormat;
    use crate::models::{
        Budget, CategoryId, CategoryRef, DateRange, Money, PeriodType, Transaction, TransactionId,
    };
    use tempfile::TempDir;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn snapshot() -> Snapshot {
        let food = CategoryRef::named(CategoryId::new(1), "Food");
        Snapshot {
            transactions: vec![
                Transaction::income(TransactionId::new(1), date(1, 2), Money::from_units(3000)),
                Transaction::expense(TransactionId::new(2), date(1, 5), Money::from_units(480))
                    .with_category(food.clone()),
            ],
            budgets: vec![Budget::new(
                BudgetId::new(7),
                "January",
                PeriodType::Monthly,
                DateRange::month(2024, 1).unwrap(),
                Money::from_units(500),
            )
            .with_allocation(food, Money::from_units(500))],
            ..Snapshot::default()
        }
    }

    fn to_file(format: OutputFormat, dir: &TempDir, name: &str) -> OutputArgs {
        OutputArgs {
            format,
            output: Some(dir.path().join(name)),
        }
    }

    #[test]
    fn test_progress_to_json_file() {
        let dir = TempDir::new().unwrap();
        let session = Session::from_dir(dir.path());
        let output = to_file(OutputFormat::Json, &dir, "progress.json");
        let path = output.output.clone().unwrap();

        handle_report_command(
            &snapshot(),
            &session,
            ReportCommands::Progress {
                budget_id: Some("7".into()),
                all: false,
                output,
            },
            date(1, 20),
        )
        .unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(value["report"], "budget_progress");
        assert_eq!(value["data"][0]["budget_name"], "January");
        assert_eq!(value["data"][0]["status"], "warning");
    }

    #[test]
    fn test_unknown_budget() {
        let session = Session::from_dir("unused");
        let result = handle_report_command(
            &snapshot(),
            &session,
            ReportCommands::Progress {
                budget_id: Some("99".into()),
                all: false,
                output: OutputArgs::default(),
            },
            date(1, 20),
        );
        assert!(matches!(result, Err(ref e) if e.is_not_found()));

        let result = handle_report_command(
            &snapshot(),
            &session,
            ReportCommands::Progress {
                budget_id: Some("abc".into()),
                all: false,
                output: OutputArgs::default(),
            },
            date(1, 20),
        );
        assert!(matches!(result, Err(ref e) if e.is_not_found()));
    }

    #[test]
    fn test_dashboard_table_uses_default_period() {
        let dir = TempDir::new().unwrap();
        let session = Session::from_dir(dir.path());
        let output = to_file(OutputFormat::Table, &dir, "dashboard.txt");
        let path = output.output.clone().unwrap();

        handle_report_command(
            &snapshot(),
            &session,
            ReportCommands::Dashboard {
                range: RangeArgs::default(),
                output,
            },
            date(1, 20),
        )
        .unwrap();

        let text = std::fs::read_to_string(path).unwrap();
        assert!(text.contains("$3000.00"));
        assert!(text.contains("$480.00"));
    }

    #[test]
    fn test_breakdown_csv_top() {
        let dir = TempDir::new().unwrap();
        let session = Session::from_dir(dir.path());
        let output = to_file(OutputFormat::Csv, &dir, "breakdown.csv");
        let path = output.output.clone().unwrap();

        handle_report_command(
            &snapshot(),
            &session,
            ReportCommands::Breakdown {
                range: RangeArgs {
                    period: Some("2024-01".into()),
                    ..RangeArgs::default()
                },
                top: Some(1),
                output,
            },
            date(6, 1),
        )
        .unwrap();

        let csv = std::fs::read_to_string(path).unwrap();
        assert_eq!(csv.lines().count(), 2);
        assert!(csv.contains("Food,1,480,1,"));
    }
}
