//! Export module for Spendwise
//!
//! Writes reports in machine-readable formats:
//! - JSON: the report wrapped with schema version and generation time
//! - YAML: the same document, with a comment header
//! - CSV: one row per line item (spreadsheet-compatible)

pub mod csv;
pub mod json;
pub mod yaml;

use std::io::Write;

use serde::Serialize;

use crate::error::SpendwiseResult;

pub use json::{export_json, ReportExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_yaml;

pub use self::csv::export_csv;

/// A report that can be exported
pub trait Report: Serialize {
    /// Name recorded in exports, e.g. `budget_progress`
    fn kind(&self) -> &'static str;

    /// Write the report's rows; the writer adds the header from the first row
    fn write_rows<W: Write>(&self, writer: &mut ::csv::Writer<W>) -> ::csv::Result<()>;
}

/// Machine-readable output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Yaml,
    Csv,
}

/// Export `report` in `format`
pub fn export_report<R: Report, W: Write>(
    report: &R,
    format: ExportFormat,
    writer: &mut W,
) -> SpendwiseResult<()> {
    match format {
        ExportFormat::Json => export_json(report, writer),
        ExportFormat::Yaml => export_yaml(report, writer),
        ExportFormat::Csv => export_csv(report, writer),
    }
}
