//! Configuration loading and representation.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `TABSPLIT_LOG` | `info` | tracing filter directive |
//! | `TABSPLIT_LOG_FORMAT` | `json` | `json` or `pretty` |
//! | `TABSPLIT_EXPORT_DELIMITER` | `,` | single ASCII character for CSV export |

use thiserror::Error;

use tabsplit_observability::{LogConfig, LogFormat, UnknownLogFormat};

pub const LOG_FILTER_VAR: &str = "TABSPLIT_LOG";
pub const LOG_FORMAT_VAR: &str = "TABSPLIT_LOG_FORMAT";
pub const EXPORT_DELIMITER_VAR: &str = "TABSPLIT_EXPORT_DELIMITER";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("TABSPLIT_LOG_FORMAT: {0}")]
    LogFormat(#[from] UnknownLogFormat),

    #[error("TABSPLIT_EXPORT_DELIMITER must be a single ASCII character, got {0:?}")]
    Delimiter(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub log: LogConfig,
    pub export_delimiter: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log: LogConfig::default(),
            export_delimiter: b',',
        }
    }
}

impl Settings {
    /// Reads settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`; unset keys fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Settings::default();

        let filter = lookup(LOG_FILTER_VAR)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.log.filter);

        let format = match lookup(LOG_FORMAT_VAR) {
            Some(raw) => raw.parse::<LogFormat>()?,
            None => defaults.log.format,
        };

        let export_delimiter = match lookup(EXPORT_DELIMITER_VAR) {
            Some(raw) => parse_delimiter(&raw)?,
            None => defaults.export_delimiter,
        };

        Ok(Self {
            log: LogConfig { filter, format },
            export_delimiter,
        })
    }
}

fn parse_delimiter(raw: &str) -> Result<u8, ConfigError> {
    let unescaped = if raw == "\\t" { "\t" } else { raw };
    match unescaped.as_bytes() {
        [b] if b.is_ascii() => Ok(*b),
        _ => Err(ConfigError::Delimiter(raw.to_string())),
    }
}
