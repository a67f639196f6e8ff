//! Tracing setup for the binary
//!
//! Filter comes from `RUST_LOG`, falling back to the level passed in. Output
//! goes to stderr so report output on stdout stays clean. Set
//! `SPENDWISE_LOG_FORMAT=json` for structured logs.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable selecting `text` (default) or `json` log output
pub const LOG_FORMAT_ENV: &str = "SPENDWISE_LOG_FORMAT";

/// Install the global subscriber. Call once, from `main`.
pub fn init_tracing(default_level: &str) {
    let log_format = std::env::var(LOG_FORMAT_ENV).unwrap_or_else(|_| "text".to_string());
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}
