//! Shared command-line arguments

use std::path::PathBuf;

use chrono::{Datelike, Months, NaiveDate};
use clap::{Args, ValueEnum};

use crate::error::{SpendwiseError, SpendwiseResult};
use crate::export::ExportFormat;
use crate::models::DateRange;

/// How a report is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Yaml,
    Csv,
}

impl OutputFormat {
    /// The export format, or `None` for the terminal table
    pub fn export_format(self) -> Option<ExportFormat> {
        match self {
            Self::Table => None,
            Self::Json => Some(ExportFormat::Json),
            Self::Yaml => Some(ExportFormat::Yaml),
            Self::Csv => Some(ExportFormat::Csv),
        }
    }
}

/// Output options shared by every report command
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// A date range given as a period or as explicit start/end dates
#[derive(Args, Debug, Clone, Default)]
pub struct RangeArgs {
    /// Period: "2025-01", "2025-Q1", "2025" or "2025-01-01..2025-01-15"
    #[arg(short, long, conflicts_with_all = ["start", "end"])]
    pub period: Option<String>,

    /// Start date (YYYY-MM-DD)
    #[arg(short, long)]
    pub start: Option<String>,

    /// End date (YYYY-MM-DD)
    #[arg(short, long)]
    pub end: Option<String>,
}

impl RangeArgs {
    /// Resolve to a concrete range; anything not given comes from `default`
    pub fn resolve(&self, default: DateRange) -> SpendwiseResult<DateRange> {
        if let Some(period) = &self.period {
            return DateRange::parse(period).map_err(|e| {
                SpendwiseError::Validation(format!(
                    "{}. Use YYYY-MM, YYYY-Qn, YYYY or START..END",
                    e
                ))
            });
        }

        let start = match &self.start {
            Some(s) => parse_date(s, "start")?,
            None => default.start,
        };
        let end = match &self.end {
            Some(e) => parse_date(e, "end")?,
            None => default.end,
        };

        DateRange::new(start, end).map_err(|e| SpendwiseError::Validation(e.to_string()))
    }
}

/// Parse a YYYY-MM-DD date argument
pub fn parse_date(s: &str, what: &str) -> SpendwiseResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        SpendwiseError::Validation(format!("Invalid {} date format: {}. Use YYYY-MM-DD", what, s))
    })
}

/// The `months` calendar months ending with the month of `today`
pub fn trailing_months(today: NaiveDate, months: u32) -> DateRange {
    let first_of_month = today.with_day(1).unwrap_or(today);
    let start = first_of_month
        .checked_sub_months(Months::new(months.max(1) - 1))
        .unwrap_or(first_of_month);
    DateRange { start, end: today }
}
