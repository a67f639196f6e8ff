//! CLI command handlers
//!
//! This module bridges the clap argument parsing with the loaded snapshot
//! and the report functions.

pub mod args;
pub mod report;

pub use args::{OutputArgs, OutputFormat, RangeArgs};
pub use report::{handle_report_command, KindFilter, ReportCommands};
