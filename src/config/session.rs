//! Per-run session
//!
//! Settings, command-line overrides and environment resolved once at startup
//! into an explicit value that is handed to the loader and the renderers.

use std::path::PathBuf;
use std::time::Duration;

use super::paths::SpendwisePaths;
use super::settings::Settings;
use crate::error::{SpendwiseError, SpendwiseResult};
use crate::models::PeriodType;

/// Where the snapshot is loaded from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// The REST backend
    Api {
        /// Always ends with `/`
        base_url: String,
        token: Option<String>,
        timeout: Duration,
    },
    /// A directory of JSON fixture files
    Files { dir: PathBuf },
}

/// Values given on the command line (or via their environment variables)
#[derive(Debug, Clone, Default)]
pub struct SessionOverrides {
    pub data_dir: Option<PathBuf>,
    pub api_url: Option<String>,
    pub token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub source: DataSource,
    pub currency_symbol: String,
    pub date_format: String,
    pub default_period: PeriodType,
}

impl Session {
    /// Resolve the session.
    ///
    /// Source precedence: `--data-dir`, then `--api-url`, then the settings'
    /// `api_base_url`, then the default data directory.
    pub fn resolve(
        settings: &Settings,
        paths: &SpendwisePaths,
        overrides: SessionOverrides,
    ) -> SpendwiseResult<Self> {
        let source = match (overrides.data_dir, overrides.api_url) {
            (Some(_), Some(_)) => {
                return Err(SpendwiseError::Config(
                    "--data-dir and --api-url cannot be used together".into(),
                ))
            }
            (Some(dir), None) => DataSource::Files { dir },
            (None, Some(url)) => api_source(&url, overrides.token, settings)?,
            (None, None) => match &settings.api_base_url {
                Some(url) => api_source(url, overrides.token, settings)?,
                None => DataSource::Files {
                    dir: paths.data_dir(),
                },
            },
        };

        Ok(Self {
            source,
            currency_symbol: settings.currency_symbol.clone(),
            date_format: settings.date_format.clone(),
            default_period: settings.default_period,
        })
    }

    /// A file-backed session with default presentation, for tests and tools
    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        let settings = Settings::default();
        Self {
            source: DataSource::Files { dir: dir.into() },
            currency_symbol: settings.currency_symbol,
            date_format: settings.date_format,
            default_period: settings.default_period,
        }
    }
}

fn api_source(url: &str, token: Option<String>, settings: &Settings) -> SpendwiseResult<DataSource> {
    let trimmed = url.trim();
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(SpendwiseError::Config(format!(
            "API URL must start with http:// or https://: {}",
            url
        )));
    }

    let base_url = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{}/", trimmed)
    };

    Ok(DataSource::Api {
        base_url,
        token: token.filter(|t| !t.trim().is_empty()),
        timeout: Duration::from_secs(settings.request_timeout_secs.max(1)),
    })
}
