//! Budget periods and inclusive date ranges
//!
//! Budgets carry an explicit `[start_date, end_date]` range plus the period
//! type the user picked when creating them. `DateRange` is the inclusive range
//! every aggregation filters on.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The period type a budget was created with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PeriodType {
    #[default]
    Monthly,
    Quarterly,
    Yearly,
    Custom,
}

impl PeriodType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "Monthly",
            Self::Quarterly => "Quarterly",
            Self::Yearly => "Yearly",
            Self::Custom => "Custom",
        }
    }

    /// The range of this period type that contains `date`.
    ///
    /// `Custom` has no natural boundaries, so it collapses to the single day.
    pub fn range_containing(&self, date: NaiveDate) -> DateRange {
        match self {
            Self::Monthly => DateRange::month(date.year(), date.month())
                .unwrap_or_else(|| DateRange::day(date)),
            Self::Quarterly => DateRange::quarter(date.year(), (date.month() - 1) / 3 + 1)
                .unwrap_or_else(|| DateRange::day(date)),
            Self::Yearly => DateRange::year(date.year()).unwrap_or_else(|| DateRange::day(date)),
            Self::Custom => DateRange::day(date),
        }
    }
}

impl fmt::Display for PeriodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An inclusive calendar date range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Create a range, rejecting `start > end`
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, PeriodParseError> {
        if start > end {
            return Err(PeriodParseError::Inverted { start, end });
        }
        Ok(Self { start, end })
    }

    /// A range covering exactly one day
    pub fn day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// The calendar month `year-month`
    pub fn month(year: i32, month: u32) -> Option<Self> {
        let start = NaiveDate::from_ymd_opt(year, month, 1)?;
        let next = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)?
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)?
        };
        Some(Self {
            start,
            end: next - Duration::days(1),
        })
    }

    /// Quarter `quarter` (1-4) of `year`
    pub fn quarter(year: i32, quarter: u32) -> Option<Self> {
        if !(1..=4).contains(&quarter) {
            return None;
        }
        let first_month = (quarter - 1) * 3 + 1;
        let start = Self::month(year, first_month)?.start;
        let end = Self::month(year, first_month + 2)?.end;
        Some(Self { start, end })
    }

    /// The calendar year
    pub fn year(year: i32) -> Option<Self> {
        Some(Self {
            start: NaiveDate::from_ymd_opt(year, 1, 1)?,
            end: NaiveDate::from_ymd_opt(year, 12, 31)?,
        })
    }

    /// The `days`-long window ending on `end` (inclusive)
    pub fn trailing_days(end: NaiveDate, days: i64) -> Self {
        Self {
            start: end - Duration::days(days.max(1) - 1),
            end,
        }
    }

    /// Check if a date falls within this range (both ends inclusive)
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Number of days covered, counting both ends
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// The first day of every calendar month this range touches, in order
    pub fn months(&self) -> Vec<(i32, u32)> {
        let mut months = Vec::new();
        let (mut year, mut month) = (self.start.year(), self.start.month());
        let (last_year, last_month) = (self.end.year(), self.end.month());

        while (year, month) <= (last_year, last_month) {
            months.push((year, month));
            if month == 12 {
                year += 1;
                month = 1;
            } else {
                month += 1;
            }
        }

        months
    }

    /// Parse a period string
    ///
    /// Formats:
    /// - Yearly: "2025"
    /// - Quarterly: "2025-Q1"
    /// - Monthly: "2025-01"
    /// - Custom: "2025-01-01..2025-01-15"
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        let s = s.trim();
        let invalid = || PeriodParseError::InvalidFormat(s.to_string());

        if let Some((start, end)) = s.split_once("..") {
            let start = NaiveDate::parse_from_str(start, "%Y-%m-%d").map_err(|_| invalid())?;
            let end = NaiveDate::parse_from_str(end, "%Y-%m-%d").map_err(|_| invalid())?;
            return Self::new(start, end);
        }

        if let Some((year, quarter)) = s.split_once("-Q") {
            let year: i32 = year.parse().map_err(|_| invalid())?;
            let quarter: u32 = quarter.parse().map_err(|_| invalid())?;
            return Self::quarter(year, quarter).ok_or(PeriodParseError::InvalidQuarter(quarter));
        }

        if let Some((year, month)) = s.split_once('-') {
            let year: i32 = year.parse().map_err(|_| invalid())?;
            let month: u32 = month.parse().map_err(|_| invalid())?;
            if !(1..=12).contains(&month) {
                return Err(PeriodParseError::InvalidMonth(month));
            }
            return Self::month(year, month).ok_or_else(invalid);
        }

        let year: i32 = s.parse().map_err(|_| invalid())?;
        Self::year(year).ok_or_else(invalid)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}..{}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}

/// Error type for period parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
    InvalidQuarter(u32),
    Inverted { start: NaiveDate, end: NaiveDate },
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodParseError::InvalidFormat(s) => write!(f, "Invalid period format: {}", s),
            PeriodParseError::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
            PeriodParseError::InvalidQuarter(q) => write!(f, "Invalid quarter: {}", q),
            PeriodParseError::Inverted { start, end } => {
                write!(f, "Start date {} is after end date {}", start, end)
            }
        }
    }
}

impl std::error::Error for PeriodParseError {}

/// Format a date with a user-supplied strftime pattern.
///
/// Returns `None` when the pattern is invalid or asks for fields a plain
/// date does not have (hours, time zones).
pub fn format_date(date: NaiveDate, pattern: &str) -> Option<String> {
    use std::fmt::Write;

    let mut out = String::new();
    write!(out, "{}", date.format(pattern)).ok()?;
    Some(out)
}
