//! Fixture directory loading
//!
//! A directory holding the same JSON the backend would return, one file per
//! endpoint. Useful offline and in tests.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde_json::Value;

use super::wire::split_page;
use super::RawSnapshot;
use crate::error::{SpendwiseError, SpendwiseResult};

pub const TRANSACTIONS_FILE: &str = "transactions.json";
pub const BUDGETS_FILE: &str = "budgets.json";
pub const CATEGORIES_FILE: &str = "categories.json";
pub const ALERTS_FILE: &str = "alerts.json";

/// Read a list file; a missing file is an error
fn read_records_required(path: &Path) -> SpendwiseResult<Vec<Value>> {
    if !path.exists() {
        return Err(SpendwiseError::Io(format!(
            "File not found: {}",
            path.display()
        )));
    }

    let file = File::open(path)
        .map_err(|e| SpendwiseError::Io(format!("Failed to open {}: {}", path.display(), e)))?;

    let body: Value = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| SpendwiseError::Json(format!("Failed to parse {}: {}", path.display(), e)))?;

    let (records, _) = split_page(body, &path.display().to_string())?;
    Ok(records)
}

/// Read a list file; a missing file is an empty list
fn read_records(path: &Path) -> SpendwiseResult<Vec<Value>> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "Optional file missing, using empty list");
        return Ok(Vec::new());
    }
    read_records_required(path)
}

/// Read every list file in `dir`.
///
/// `transactions.json` and `budgets.json` must exist; `categories.json` and
/// `alerts.json` are optional.
pub fn load_dir(dir: &Path) -> SpendwiseResult<RawSnapshot> {
    if !dir.is_dir() {
        return Err(SpendwiseError::Config(format!(
            "Data directory not found: {}",
            dir.display()
        )));
    }

    tracing::debug!(dir = %dir.display(), "Loading fixture directory");

    Ok(RawSnapshot {
        transactions: read_records_required(&dir.join(TRANSACTIONS_FILE))?,
        budgets: read_records_required(&dir.join(BUDGETS_FILE))?,
        categories: read_records(&dir.join(CATEGORIES_FILE))?,
        alerts: read_records(&dir.join(ALERTS_FILE))?,
    })
}
