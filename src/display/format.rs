//! Formatting helpers for terminal output

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::config::Session;
use chrono::NaiveDate;

use crate::models::{format_date, DateRange, Money};

/// Presentation preferences taken from the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayOptions {
    pub currency_symbol: String,
    pub date_format: String,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            currency_symbol: "$".to_string(),
            date_format: "%Y-%m-%d".to_string(),
        }
    }
}

impl From<&Session> for DisplayOptions {
    fn from(session: &Session) -> Self {
        Self {
            currency_symbol: session.currency_symbol.clone(),
            date_format: session.date_format.clone(),
        }
    }
}

impl DisplayOptions {
    pub fn money(&self, amount: Money) -> String {
        amount.format_with_symbol(&self.currency_symbol)
    }

    /// A date in the preferred format, or ISO 8601 if that format cannot render it
    pub fn date(&self, date: NaiveDate) -> String {
        format_date(date, &self.date_format).unwrap_or_else(|| date.to_string())
    }

    pub fn range(&self, range: &DateRange) -> String {
        format!("{} to {}", self.date(range.start), self.date(range.end))
    }
}

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: Decimal) -> String {
    let magnitude = pct.abs();
    if magnitude > Decimal::ZERO && magnitude < Decimal::new(1, 1) {
        format!("{:.2}%", pct)
    } else if magnitude < Decimal::TEN {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// A progress bar for a percentage, full at 100% and never longer
pub fn format_bar(pct: Decimal, width: usize) -> String {
    let clipped = pct.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);
    let filled = (clipped * Decimal::from(width) / Decimal::ONE_HUNDRED)
        .round()
        .to_usize()
        .unwrap_or(0)
        .min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(dec!(0.05)), "0.05%");
        assert_eq!(format_percentage(dec!(5.5)), "5.5%");
        assert_eq!(format_percentage(dec!(0)), "0.0%");
        assert_eq!(format_percentage(dec!(96)), "96%");
        assert_eq!(format_percentage(dec!(-25)), "-25%");
    }

    #[test]
    fn test_format_bar() {
        let bar = format_bar(dec!(50), 10);
        assert_eq!(bar.chars().filter(|c| *c == '█').count(), 5);
        assert_eq!(bar.chars().count(), 10);

        assert_eq!(format_bar(dec!(250), 4), "████");
        assert_eq!(format_bar(dec!(-5), 4), "░░░░");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Hello World", 5), "He...");
        assert_eq!(truncate("Hi", 5), "Hi");
        assert_eq!(truncate("Café au lait", 6), "Caf...");
    }

    #[test]
    fn test_display_options() {
        let opts = DisplayOptions {
            currency_symbol: "€".into(),
            date_format: "%d/%m/%Y".into(),
        };
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        )
        .unwrap();

        assert_eq!(opts.money(Money::from_cents(-1050)), "-€10.50");
        assert_eq!(opts.range(&range), "01/01/2024 to 31/01/2024");
    }

    #[test]
    fn test_unrenderable_date_format_falls_back_to_iso() {
        let opts = DisplayOptions {
            date_format: "%Y-%m-%d %H:%M".into(),
            ..DisplayOptions::default()
        };

        assert_eq!(
            opts.range(&DateRange::month(2024, 1).unwrap()),
            "2024-01-01 to 2024-01-31"
        );
    }
}
