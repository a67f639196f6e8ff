//! JSON Export functionality
//!
//! Exports a report as JSON with schema versioning.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

use super::Report;
use crate::error::{SpendwiseError, SpendwiseResult};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// A report with export metadata
#[derive(Debug, Clone, Serialize)]
pub struct ReportExport<'a, T: Serialize> {
    /// Schema version for compatibility checking
    pub schema_version: &'static str,

    /// Which report this is
    pub report: &'static str,

    /// Export timestamp
    pub generated_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: &'static str,

    pub data: &'a T,
}

impl<'a, T: Report> ReportExport<'a, T> {
    pub fn new(report: &'a T) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION,
            report: report.kind(),
            generated_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION"),
            data: report,
        }
    }
}

/// Export a report to pretty-printed JSON
pub fn export_json<R: Report, W: Write>(report: &R, writer: &mut W) -> SpendwiseResult<()> {
    serde_json::to_writer_pretty(&mut *writer, &ReportExport::new(report))
        .map_err(|e| SpendwiseError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| SpendwiseError::Export(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DateRange, Money, Transaction, TransactionId};
    use crate::reports::compute_dashboard_totals;
    use chrono::NaiveDate;

    #[test]
    fn test_export_json_envelope() {
        let transactions = vec![Transaction::income(
            TransactionId::new(1),
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            Money::from_cents(300_050),
        )];
        let totals = compute_dashboard_totals(&transactions, &DateRange::month(2024, 6).unwrap());

        let mut buffer = Vec::new();
        export_json(&totals, &mut buffer).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["schema_version"], EXPORT_SCHEMA_VERSION);
        assert_eq!(value["report"], "dashboard");
        assert_eq!(value["data"]["total_income"], "3000.50");
        assert_eq!(value["data"]["range"]["start"], "2024-06-01");
        assert!(value["generated_at"].is_string());
    }
}
