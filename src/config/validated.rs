//! Validated configuration after merging CLI, TOML and default sources.
//!
//! This module contains the final, validated configuration that is used
//! by the rest of the agent. All validation is performed during
//! construction.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::retry::RetryPolicy;
use crate::sensor::{self, Sensor, SensorFs, SensorSource, SkippedRecord, StdFs};

use super::cli::Cli;
use super::defaults;
use super::duration::Formatted;
use super::error::{ConfigError, InvariantError};
use super::log_level::LogLevel;
use super::toml::TomlConfig;

/// Fully validated agent configuration.
///
/// Built once per process by [`Config::from_raw`] (or [`Config::load`]) and
/// read-only afterwards.
///
/// # Invariants
///
/// - `sensors` is non-empty
/// - `adapter` is non-empty
/// - `stale_duration >= 2 * refresh_duration`
/// - `retry` satisfies [`RetryPolicy::validate`]
#[derive(Debug)]
pub struct Config {
    /// Minimum log severity
    pub log_level: LogLevel,

    /// Listen address for the metrics endpoint
    pub listen_addr: String,

    /// Sensors to poll, in source order
    pub sensors: Vec<Sensor>,

    /// Bluetooth adapter
    pub adapter: String,

    /// Interval between sensor refreshes
    pub refresh_duration: Duration,

    /// Timeout for a single sensor read
    pub refresh_timeout: Duration,

    /// Age after which readings are no longer exported
    pub stale_duration: Duration,

    /// Backoff for failed reads
    pub retry: RetryPolicy,

    /// Sensor record directory; `None` when sensors were listed explicitly
    pub sensor_dir: Option<PathBuf>,

    /// Record files skipped while scanning `sensor_dir`
    pub skipped_records: Vec<SkippedRecord>,
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = self
            .sensor_dir
            .as_ref()
            .map_or_else(|| "cli".to_string(), |p| p.display().to_string());

        write!(
            f,
            "Config {{ addr: {}, adapter: {}, sensors: {} (source: {}, skipped: {}), \
             refresh: {}, timeout: {}, stale: {}, retry: {}..{} x{}, log_level: {} }}",
            self.listen_addr,
            self.adapter,
            self.sensors.len(),
            source,
            self.skipped_records.len(),
            Formatted(self.refresh_duration),
            Formatted(self.refresh_timeout),
            Formatted(self.stale_duration),
            Formatted(self.retry.min_delay),
            Formatted(self.retry.max_delay),
            self.retry.factor,
            self.log_level,
        )
    }
}

impl Config {
    /// Creates a validated configuration from CLI arguments and optional
    /// TOML config, resolving sensors through `fs`.
    ///
    /// Scalars resolve as CLI > TOML > default. The sensor source is picked
    /// once (see [`Config::select_sensor_source`]) and never merged.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The log level is not recognised
    /// - Sensor directory and explicit sensors are both given
    /// - The sensor directory cannot be listed
    /// - A `--sensor` token is invalid
    /// - Any invariant does not hold (first violation wins)
    pub fn from_raw(
        cli: &Cli,
        toml: Option<&TomlConfig>,
        fs: &impl SensorFs,
    ) -> Result<Self, ConfigError> {
        let log_level = Self::resolve_log_level(cli, toml)?;

        let listen_addr = cli
            .listen_addr
            .clone()
            .or_else(|| toml.and_then(|t| t.agent.addr.clone()))
            .unwrap_or_else(|| defaults::LISTEN_ADDR.to_string());

        let adapter = cli
            .adapter
            .clone()
            .or_else(|| toml.and_then(|t| t.agent.adapter.clone()))
            .unwrap_or_else(|| defaults::ADAPTER.to_string());

        let polling = toml.map(|t| &t.polling);

        let refresh_duration = cli
            .refresh_duration
            .or_else(|| polling.and_then(|p| p.refresh_duration))
            .unwrap_or_else(defaults::refresh_duration);

        let refresh_timeout = cli
            .refresh_timeout
            .or_else(|| polling.and_then(|p| p.refresh_timeout))
            .unwrap_or_else(defaults::refresh_timeout);

        let stale_duration = cli
            .stale_duration
            .or_else(|| polling.and_then(|p| p.stale_duration))
            .unwrap_or_else(defaults::stale_duration);

        let retry = Self::build_retry_policy(cli, toml);

        let source = Self::select_sensor_source(cli, toml)?;
        match &source {
            SensorSource::Directory(dir) => {
                tracing::info!("Sensor directory: {}", dir.display());
            }
            SensorSource::ExplicitList(tokens) => {
                tracing::info!("Sensors from command line: {}", tokens.len());
            }
        }

        let resolution = sensor::resolve(&source, fs)?;

        let config = Self {
            log_level,
            listen_addr,
            sensors: resolution.sensors,
            adapter,
            refresh_duration,
            refresh_timeout,
            stale_duration,
            retry,
            sensor_dir: source.directory().map(Path::to_path_buf),
            skipped_records: resolution.skipped,
        };

        config.validate()?;
        Ok(config)
    }

    /// Loads the optional config file and resolves against the real
    /// filesystem.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed, or if
    /// [`Config::from_raw`] fails.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = Self::load_file(cli)?;
        Self::from_raw(cli, toml.as_ref(), &StdFs)
    }

    /// Loads the TOML file named by `--config`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_file(cli: &Cli) -> Result<Option<TomlConfig>, ConfigError> {
        cli.config.as_deref().map(TomlConfig::load).transpose()
    }

    /// Resolves the log level alone, so logging can be set up before
    /// sensors are resolved.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidLogLevel`] for an unknown level name.
    pub fn resolve_log_level(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<LogLevel, ConfigError> {
        cli.log_level
            .as_deref()
            .or_else(|| toml.and_then(|t| t.agent.log_level.as_deref()))
            .map_or(Ok(defaults::LOG_LEVEL), str::parse::<LogLevel>)
    }

    /// Picks the sensor source for this run.
    ///
    /// The CLI wins if it names either a directory or sensors; otherwise the
    /// TOML `[sensors]` section is used; otherwise the default directory.
    /// Within one layer a non-empty directory excludes explicit sensors,
    /// and an empty directory selects the explicit list.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ConflictingSensorSources`] if one layer names
    /// both a non-empty directory and explicit sensors.
    pub fn select_sensor_source(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<SensorSource, ConfigError> {
        if cli.sensor_dir.is_some() || !cli.sensors.is_empty() {
            return choose_source(cli.sensor_dir.as_deref().map(Path::new), &cli.sensors);
        }

        let section = toml
            .map(|t| &t.sensors)
            .filter(|s| s.dir.is_some() || !s.list.is_empty());
        if let Some(section) = section {
            return choose_source(section.dir.as_deref(), &section.list);
        }

        Ok(SensorSource::Directory(PathBuf::from(defaults::SENSOR_DIR)))
    }

    /// Checks every invariant in order and returns the first violation.
    ///
    /// A refresh interval under one minute only logs a warning.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantError`] that does not hold.
    pub fn validate(&self) -> Result<(), InvariantError> {
        if self.sensors.is_empty() {
            return Err(InvariantError::NoSensors);
        }

        if self.adapter.is_empty() {
            return Err(InvariantError::MissingAdapter);
        }

        if self.is_refresh_discouraged() {
            tracing::warn!(
                "Refresh durations below one minute are discouraged: {}",
                Formatted(self.refresh_duration)
            );
        }

        let required = self.refresh_duration.saturating_mul(2);
        if self.stale_duration < required {
            return Err(InvariantError::StaleDurationTooShort {
                stale: self.stale_duration,
                refresh: self.refresh_duration,
                required,
            });
        }

        self.retry.validate()
    }

    /// Returns true if the refresh interval is below the advised minimum.
    #[must_use]
    pub fn is_refresh_discouraged(&self) -> bool {
        self.refresh_duration < defaults::DISCOURAGED_REFRESH_BELOW
    }

    fn build_retry_policy(cli: &Cli, toml: Option<&TomlConfig>) -> RetryPolicy {
        let retry = toml.map(|t| &t.retry);

        let min_delay = cli
            .retry_min_duration
            .or_else(|| retry.and_then(|r| r.min_duration))
            .unwrap_or(RetryPolicy::DEFAULT_MIN_DELAY);

        let max_delay = cli
            .retry_max_duration
            .or_else(|| retry.and_then(|r| r.max_duration))
            .unwrap_or(RetryPolicy::DEFAULT_MAX_DELAY);

        let factor = cli
            .retry_factor
            .or_else(|| retry.and_then(|r| r.factor))
            .unwrap_or(RetryPolicy::DEFAULT_FACTOR);

        RetryPolicy::new()
            .with_min_delay(min_delay)
            .with_max_delay(max_delay)
            .with_factor(factor)
    }
}

fn choose_source(dir: Option<&Path>, tokens: &[String]) -> Result<SensorSource, ConfigError> {
    match dir {
        Some(dir) if !dir.as_os_str().is_empty() => {
            if !tokens.is_empty() {
                return Err(ConfigError::ConflictingSensorSources {
                    dir: dir.to_path_buf(),
                });
            }
            Ok(SensorSource::Directory(dir.to_path_buf()))
        }
        _ => Ok(SensorSource::ExplicitList(tokens.to_vec())),
    }
}
