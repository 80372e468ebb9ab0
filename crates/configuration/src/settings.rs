use crate::error::ConfigError;
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub source: SourceSettings,
    pub logging: LoggingSettings,
}

impl Settings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.source.validate()
    }
}

/// Where box records are loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// A delimited-text export with a header row.
    Csv,
    /// The query endpoint of the box store.
    #[default]
    Http,
}

/// Contains parameters for the one-shot record load.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    pub kind: SourceKind,
    /// Path of the CSV export (used when `kind = "csv"`).
    pub csv_path: Option<PathBuf>,
    /// Base URL of the box store (used when `kind = "http"`), e.g. `http://localhost:8000`.
    pub base_url: Option<String>,
    /// Server-side ticker selection, e.g. `NQ=F`.
    pub ticker: Option<String>,
    /// Server-side dataset (provider) selection.
    pub dataset: Option<String>,
    /// Request timeout for HTTP loads.
    pub timeout_secs: u64,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            kind: SourceKind::Http,
            csv_path: None,
            base_url: Some("http://localhost:8000".to_string()),
            ticker: None,
            dataset: None,
            timeout_secs: 10,
        }
    }
}

impl SourceSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.kind {
            SourceKind::Csv if self.csv_path.is_none() => Err(ConfigError::ValidationError(
                "source.csv_path is required when source.kind = \"csv\"".to_string(),
            )),
            SourceKind::Http if self.base_url.as_deref().is_none_or(str::is_empty) => {
                Err(ConfigError::ValidationError(
                    "source.base_url is required when source.kind = \"http\"".to_string(),
                ))
            }
            _ if self.timeout_secs == 0 => Err(ConfigError::ValidationError(
                "source.timeout_secs must be greater than zero".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

/// Contains parameters for the tracing subscriber.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive; `RUST_LOG` takes precedence when set.
    pub level: String,
    /// When set, logs are also written to a daily-rolling file in this directory.
    pub directory: Option<PathBuf>,
    pub file_prefix: String,
    /// Emit JSON lines on the console instead of human-readable text.
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            file_prefix: "ivb-stats.log".to_string(),
            json: false,
        }
    }
}
