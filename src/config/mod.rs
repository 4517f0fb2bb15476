//! Configuration layer for the agent.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`Config`])
//! - Duration strings ([`duration`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Scalar values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments**
//! 2. **TOML config file** (`--config`)
//! 3. **Built-in defaults**
//!
//! # Sensor Sources
//!
//! Sensors come from exactly one source and are never merged:
//!
//! - `--sensordir` with a non-empty path scans that directory; combining it
//!   with `--sensor` is an error.
//! - `--sensor` (or `--sensordir ""`) uses the listed tokens.
//! - Without either flag the TOML `[sensors]` section decides, following the
//!   same rules; without that the default directory (`sensors`) is scanned.
//!
//! # Validation
//!
//! After resolution the invariants are checked in a fixed order and the
//! first violation aborts startup:
//!
//! 1. at least one sensor
//! 2. non-empty adapter
//! 3. refresh interval of at least one minute (warning only)
//! 4. `stale_duration >= 2 * refresh_duration`
//! 5. retry minimum of at least 30 seconds
//! 6. retry maximum not below the minimum
//! 7. retry factor of at least 1

mod cli;
pub mod defaults;
pub mod duration;
mod error;
mod log_level;
mod toml;
mod validated;

#[cfg(test)]
mod validated_tests;

pub use self::cli::Cli;
pub use self::error::{ConfigError, InvariantError, field};
pub use self::log_level::LogLevel;
pub use self::toml::TomlConfig;
pub use self::validated::Config;
