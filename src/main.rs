//! Flower Care agent
//!
//! Entry point for the flowercare-agent application.

use flowercare_agent::config::{Cli, Config};
use std::process::ExitCode;

mod app;

use app::{exit_code, log_sensors, print_config_hint, setup_tracing};

/// Main entry point.
///
/// Excluded from coverage as it's the thin wrapper around testable components.
#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = Cli::parse_args();

    // Logging comes first so sensor resolution can report skipped records
    let toml = match Config::load_file(&cli) {
        Ok(toml) => toml,
        Err(e) => return config_error(&e),
    };
    let log_level = match Config::resolve_log_level(&cli, toml.as_ref()) {
        Ok(level) => level,
        Err(e) => return config_error(&e),
    };
    setup_tracing(log_level);

    let config = match Config::from_raw(&cli, toml.as_ref(), &flowercare_agent::sensor::StdFs) {
        Ok(config) => config,
        Err(e) => return config_error(&e),
    };

    tracing::info!("{config}");
    log_sensors(&config);

    exit_code::SUCCESS
}

fn config_error(error: &flowercare_agent::config::ConfigError) -> ExitCode {
    eprintln!("Configuration error: {error}");
    print_config_hint(error);
    exit_code::CONFIG_ERROR
}
