//! Error types for configuration parsing and validation.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use super::duration::Formatted;
use super::log_level::LogLevel;
use crate::sensor::{ResolveError, SourceError, TokenParseError};

/// Error type for configuration operations.
///
/// Every variant aborts startup; no partially resolved configuration is
/// ever returned alongside it.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("Failed to read config file '{}': {source}", path.display())]
    FileRead {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Log level is not part of the known vocabulary.
    #[error(
        "Invalid log level '{value}': expected one of {}",
        LogLevel::NAMES.join(", ")
    )]
    InvalidLogLevel {
        /// The value provided
        value: String,
    },

    /// Both a sensor directory and explicit sensors were given.
    #[error(
        "Sensor directory '{}' and explicit sensors are mutually exclusive",
        dir.display()
    )]
    ConflictingSensorSources {
        /// The sensor directory that was requested
        dir: PathBuf,
    },

    /// The sensor directory could not be listed.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// A `--sensor` value could not be parsed.
    #[error("Can not parse sensor: {0}")]
    Token(#[from] TokenParseError),

    /// A cross-field rule does not hold.
    #[error(transparent)]
    Invariant(#[from] InvariantError),
}

impl From<ResolveError> for ConfigError {
    fn from(error: ResolveError) -> Self {
        match error {
            ResolveError::Source(e) => Self::Source(e),
            ResolveError::Token(e) => Self::Token(e),
        }
    }
}

/// A configuration invariant that does not hold.
///
/// Checked in declaration order; the first violation is reported.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvariantError {
    /// No sensor was resolved.
    #[error("Need to provide at least one sensor")]
    NoSensors,

    /// The adapter name is empty.
    #[error("Need to provide a bluetooth adapter")]
    MissingAdapter,

    /// The staleness window is shorter than two refresh intervals.
    #[error(
        "Stale duration needs to be at least {} (2 x refresh duration {}): {}",
        pretty(.required), pretty(.refresh), pretty(.stale)
    )]
    StaleDurationTooShort {
        /// Configured staleness window
        stale: Duration,
        /// Configured refresh interval
        refresh: Duration,
        /// Minimum acceptable staleness window
        required: Duration,
    },

    /// The minimum retry wait is below the floor.
    #[error("Retry min duration needs to be at least {}: {}", pretty(.floor), pretty(.min))]
    RetryMinTooShort {
        /// Configured minimum wait
        min: Duration,
        /// Lowest accepted minimum wait
        floor: Duration,
    },

    /// The maximum retry wait is below the minimum.
    #[error(
        "Retry max duration needs to be larger or equal to min duration: {} < {}",
        pretty(.max), pretty(.min)
    )]
    RetryMaxBelowMin {
        /// Configured minimum wait
        min: Duration,
        /// Configured maximum wait
        max: Duration,
    },

    /// The growth factor is below one or not a finite number.
    #[error("Retry factor needs to be a number equal or larger than one: {factor}")]
    RetryFactor {
        /// Configured factor
        factor: f64,
    },
}

impl InvariantError {
    /// Name of the setting that violates the invariant.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::NoSensors => field::SENSORS,
            Self::MissingAdapter => field::ADAPTER,
            Self::StaleDurationTooShort { .. } => field::STALE_DURATION,
            Self::RetryMinTooShort { .. } => field::RETRY_MIN_DURATION,
            Self::RetryMaxBelowMin { .. } => field::RETRY_MAX_DURATION,
            Self::RetryFactor { .. } => field::RETRY_FACTOR,
        }
    }
}

const fn pretty(duration: &Duration) -> Formatted {
    Formatted(*duration)
}

/// Well-known setting names used in diagnostics.
pub mod field {
    /// The sensor list.
    pub const SENSORS: &str = "sensors";
    /// The bluetooth adapter.
    pub const ADAPTER: &str = "adapter";
    /// The staleness window.
    pub const STALE_DURATION: &str = "stale_duration";
    /// The minimum retry wait.
    pub const RETRY_MIN_DURATION: &str = "retry_min_duration";
    /// The maximum retry wait.
    pub const RETRY_MAX_DURATION: &str = "retry_max_duration";
    /// The retry growth factor.
    pub const RETRY_FACTOR: &str = "retry_factor";
}
