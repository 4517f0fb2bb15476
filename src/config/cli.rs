//! CLI argument parsing using clap.
//!
//! Every option is optional so that unset values can fall back to the
//! config file and then to the built-in defaults.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use super::duration;

/// Flower Care agent: polls BLE soil and light sensors.
///
/// Resolves and validates the agent configuration from command-line
/// flags, an optional TOML file and built-in defaults.
#[derive(Debug, Parser)]
#[command(name = "flowercare-agent")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Directory containing sensor JSON files (excludes --sensor)
    #[arg(long = "sensordir", short = 'z', value_name = "DIR")]
    pub sensor_dir: Option<String>,

    /// MAC address of a sensor to collect data from, optionally prefixed
    /// with a name (can be specified multiple times)
    #[arg(long = "sensor", short = 's', value_name = "NAME=ADDRESS")]
    pub sensors: Vec<String>,

    /// Minimum log level to show
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Address to listen on for connections
    #[arg(long = "addr", short = 'a')]
    pub listen_addr: Option<String>,

    /// Bluetooth adapter to use for communication
    #[arg(long, short = 'i')]
    pub adapter: Option<String>,

    /// Interval used for refreshing data from bluetooth devices
    #[arg(long = "refresh-duration", short = 'r', value_parser = duration::parse)]
    pub refresh_duration: Option<Duration>,

    /// Timeout for reading data from a sensor
    #[arg(long = "refresh-timeout", value_parser = duration::parse)]
    pub refresh_timeout: Option<Duration>,

    /// Duration after which data is considered stale and no longer exported
    #[arg(long = "stale-duration", value_parser = duration::parse)]
    pub stale_duration: Option<Duration>,

    /// Minimum wait time between retries on error
    #[arg(long = "retry-min-duration", value_parser = duration::parse)]
    pub retry_min_duration: Option<Duration>,

    /// Maximum wait time between retries on error
    #[arg(long = "retry-max-duration", value_parser = duration::parse)]
    pub retry_max_duration: Option<Duration>,

    /// Factor used to multiply wait time for subsequent retries
    #[arg(long = "retry-factor", allow_negative_numbers = true)]
    pub retry_factor: Option<f64>,

    /// Path to configuration file
    #[arg(long, short)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Fallible variant of [`Cli::parse_from_iter`].
    ///
    /// # Errors
    ///
    /// Returns the clap error for unknown flags or unparsable values.
    pub fn try_parse_from_iter<I, T>(iter: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::try_parse_from(iter)
    }
}
