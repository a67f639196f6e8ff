//! Configuration module for Spendwise
//!
//! This module provides configuration management including:
//! - Platform path resolution
//! - User settings persistence
//! - The per-run session handed to the loader

pub mod paths;
pub mod session;
pub mod settings;

pub use paths::SpendwisePaths;
pub use session::{DataSource, Session, SessionOverrides};
pub use settings::Settings;
