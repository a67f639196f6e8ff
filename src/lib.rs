//! Spendwise - budget-vs-spending reports for a personal finance backend
//!
//! This library loads transactions, budgets, categories and budget alerts
//! from a REST backend (or a directory of JSON files) and aggregates them
//! into budget progress, dashboard totals and category groupings.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Paths, settings and the per-run session
//! - `data`: Loading and normalising records into a snapshot
//! - `models`: Canonical data models (transactions, budgets, categories, etc.)
//! - `reports`: Pure aggregation functions
//! - `display`: Terminal rendering
//! - `export`: JSON, YAML and CSV output
//! - `cli`: Command handlers for the binary
//! - `error`: Custom error types
//!
//! # Example
//!
//! ```rust,ignore
//! use spendwise::config::Session;
//! use spendwise::data::load_snapshot;
//! use spendwise::reports::compute_all_budget_progress;
//!
//! let session = Session::from_dir("fixtures");
//! let snapshot = load_snapshot(&session).await?;
//! let progress = compute_all_budget_progress(&snapshot.budgets, &snapshot.transactions);
//! ```

pub mod cli;
pub mod config;
pub mod data;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod reports;

pub use error::{SpendwiseError, SpendwiseResult};
