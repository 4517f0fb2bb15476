//! Application startup and utilities.
//!
//! This module contains exit codes, tracing setup, and error hints
//! that support the main entry point.

use flowercare_agent::config::{Config, ConfigError, InvariantError, LogLevel};
use tracing_subscriber::EnvFilter;

/// Application exit codes.
pub mod exit_code {
    use std::process::ExitCode;

    /// Success (exit code 0).
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Configuration error (exit code 1) - invalid args, failed invariant, etc.
    pub const CONFIG_ERROR: ExitCode = ExitCode::FAILURE;
}

/// Prints helpful hints for common configuration errors.
pub fn print_config_hint(error: &ConfigError) {
    match error {
        ConfigError::Invariant(InvariantError::NoSensors) => {
            eprintln!(
                "\nUse --sensor NAME=ADDRESS or point --sensordir at a directory of sensor JSON files."
            );
        }
        ConfigError::Source(_) => {
            eprintln!("\nUse --sensordir to choose another directory, or --sensordir \"\" with --sensor.");
        }
        ConfigError::ConflictingSensorSources { .. } => {
            eprintln!("\nPass either --sensordir or --sensor, not both.");
        }
        ConfigError::Invariant(e) => {
            eprintln!("\nCheck the '{}' setting.", e.field());
        }
        _ => {}
    }
}

/// Sets up the tracing subscriber for logging.
///
/// `RUST_LOG` refines the configured level.
pub fn setup_tracing(level: LogLevel) {
    let filter = EnvFilter::builder()
        .with_default_directive(level.as_tracing().into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Logs each resolved sensor with its thresholds.
pub fn log_sensors(config: &Config) {
    for sensor in &config.sensors {
        if sensor.thresholds.is_unset() {
            tracing::info!("Sensor: {sensor}");
        } else {
            tracing::info!(thresholds = ?sensor.thresholds, "Sensor: {sensor}");
        }
    }
}
