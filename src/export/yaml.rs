//! YAML Export functionality
//!
//! Exports a report to YAML for human-readable output.

use std::io::Write;

use super::json::ReportExport;
use super::Report;
use crate::error::{SpendwiseError, SpendwiseResult};

/// Export a report to YAML, preceded by a comment header
pub fn export_yaml<R: Report, W: Write>(report: &R, writer: &mut W) -> SpendwiseResult<()> {
    let export = ReportExport::new(report);

    writeln!(writer, "# Spendwise report: {}", export.report)
        .map_err(|e| SpendwiseError::Export(e.to_string()))?;
    writeln!(writer, "# Generated: {}", export.generated_at)
        .map_err(|e| SpendwiseError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| SpendwiseError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, Transaction, TransactionId};
    use crate::reports::{spending_insights, Insight};
    use chrono::NaiveDate;

    #[test]
    fn test_export_yaml() {
        let day = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let transactions = vec![
            Transaction::income(TransactionId::new(1), day, Money::from_units(1000)),
            Transaction::expense(TransactionId::new(2), day, Money::from_units(900)),
        ];
        let insights: Vec<Insight> = spending_insights(&transactions, day);

        let mut buffer = Vec::new();
        export_yaml(&insights, &mut buffer).unwrap();
        let yaml = String::from_utf8(buffer).unwrap();

        assert!(yaml.starts_with("# Spendwise report: insights\n"));
        assert!(yaml.contains("kind: high_spending"));

        let body: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(body["report"], serde_yaml::Value::from("insights"));
    }
}
