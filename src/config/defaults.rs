//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::time::Duration;

use super::LogLevel;

/// Default minimum log level.
pub const LOG_LEVEL: LogLevel = LogLevel::Info;

/// Default listen address for the metrics endpoint.
pub const LISTEN_ADDR: &str = ":9294";

/// Default bluetooth adapter.
pub const ADAPTER: &str = "hci0";

/// Default directory holding sensor record files.
pub const SENSOR_DIR: &str = "sensors";

/// Default refresh interval in seconds.
pub const REFRESH_DURATION_SECS: u64 = 2 * 60;

/// Default per-read timeout in seconds.
pub const REFRESH_TIMEOUT_SECS: u64 = 60;

/// Default staleness window in seconds.
pub const STALE_DURATION_SECS: u64 = 5 * 60;

/// Refresh intervals below this are discouraged (warning only).
pub const DISCOURAGED_REFRESH_BELOW: Duration = Duration::from_secs(60);

/// Default refresh interval.
#[must_use]
pub const fn refresh_duration() -> Duration {
    Duration::from_secs(REFRESH_DURATION_SECS)
}

/// Default per-read timeout.
#[must_use]
pub const fn refresh_timeout() -> Duration {
    Duration::from_secs(REFRESH_TIMEOUT_SECS)
}

/// Default staleness window.
#[must_use]
pub const fn stale_duration() -> Duration {
    Duration::from_secs(STALE_DURATION_SECS)
}
