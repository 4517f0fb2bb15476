//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use super::ConfigError;
use super::duration;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// General agent settings
    #[serde(default)]
    pub agent: AgentSection,

    /// Sensor source
    #[serde(default)]
    pub sensors: SensorsSection,

    /// Polling intervals
    #[serde(default)]
    pub polling: PollingSection,

    /// Retry policy
    #[serde(default)]
    pub retry: RetrySection,
}

/// General agent settings.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AgentSection {
    /// Minimum log level
    pub log_level: Option<String>,

    /// Listen address
    pub addr: Option<String>,

    /// Bluetooth adapter
    pub adapter: Option<String>,
}

/// Sensor source section.
///
/// `dir` and `list` are mutually exclusive.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SensorsSection {
    /// Directory of sensor record files
    pub dir: Option<PathBuf>,

    /// Explicit `name=address` entries
    #[serde(default)]
    pub list: Vec<String>,
}

/// Polling intervals section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PollingSection {
    /// Refresh interval
    #[serde(default, deserialize_with = "duration::deserialize_option")]
    pub refresh_duration: Option<Duration>,

    /// Per-read timeout
    #[serde(default, deserialize_with = "duration::deserialize_option")]
    pub refresh_timeout: Option<Duration>,

    /// Staleness window
    #[serde(default, deserialize_with = "duration::deserialize_option")]
    pub stale_duration: Option<Duration>,
}

/// Retry policy section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RetrySection {
    /// Minimum wait between retries
    #[serde(default, deserialize_with = "duration::deserialize_option")]
    pub min_duration: Option<Duration>,

    /// Maximum wait between retries
    #[serde(default, deserialize_with = "duration::deserialize_option")]
    pub max_duration: Option<Duration>,

    /// Backoff multiplier
    pub factor: Option<f64>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}
