//! Tests for CLI vs TOML vs default precedence rules.

use std::time::Duration;

use crate::config::LogLevel;

use super::*;

const FULL_TOML: &str = r#"
    [agent]
    log_level = "debug"
    addr = "127.0.0.1:9000"
    adapter = "hci1"

    [sensors]
    list = ["AA"]

    [polling]
    refresh_duration = "5m"
    refresh_timeout = "90s"
    stale_duration = "15m"

    [retry]
    min_duration = "1m"
    max_duration = "1h"
    factor = 1.5
"#;

mod toml_over_defaults {
    use super::*;

    #[test]
    fn every_scalar_comes_from_toml() {
        let toml = toml(FULL_TOML);
        let config = Config::from_raw(&cli(&[]), Some(&toml), &UnreachableFs).unwrap();

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.listen_addr, "127.0.0.1:9000");
        assert_eq!(config.adapter, "hci1");
        assert_eq!(config.refresh_duration, Duration::from_secs(300));
        assert_eq!(config.refresh_timeout, Duration::from_secs(90));
        assert_eq!(config.stale_duration, Duration::from_secs(900));
        assert_eq!(config.retry.min_delay, Duration::from_secs(60));
        assert_eq!(config.retry.max_delay, Duration::from_secs(3600));
        assert!((config.retry.factor - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let toml = toml(
            r#"
            [agent]
            adapter = "hci2"
        "#,
        );
        let config = Config::from_raw(&cli(&["-s", "AA"]), Some(&toml), &UnreachableFs).unwrap();

        assert_eq!(config.adapter, "hci2");
        assert_eq!(config.listen_addr, ":9294");
        assert_eq!(config.refresh_duration, Duration::from_secs(120));
    }
}

mod cli_over_toml {
    use super::*;

    #[test]
    fn every_scalar_comes_from_cli() {
        let toml = toml(FULL_TOML);
        let cli = cli(&[
            "--log-level",
            "warn",
            "-a",
            ":8080",
            "-i",
            "hci3",
            "-r",
            "3m",
            "--refresh-timeout",
            "45s",
            "--stale-duration",
            "6m",
            "--retry-min-duration",
            "40s",
            "--retry-max-duration",
            "10m",
            "--retry-factor",
            "3",
        ]);

        let config = Config::from_raw(&cli, Some(&toml), &UnreachableFs).unwrap();

        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.listen_addr, ":8080");
        assert_eq!(config.adapter, "hci3");
        assert_eq!(config.refresh_duration, Duration::from_secs(180));
        assert_eq!(config.refresh_timeout, Duration::from_secs(45));
        assert_eq!(config.stale_duration, Duration::from_secs(360));
        assert_eq!(config.retry.min_delay, Duration::from_secs(40));
        assert_eq!(config.retry.max_delay, Duration::from_secs(600));
        assert!((config.retry.factor - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn last_repeated_cli_value_wins() {
        let config = Config::from_raw(
            &cli(&["-s", "AA", "-i", "hci1", "-i", "hci2"]),
            None,
            &UnreachableFs,
        )
        .unwrap();

        assert_eq!(config.adapter, "hci2");
    }

    #[test]
    fn cli_can_break_an_otherwise_valid_toml() {
        let toml = toml(FULL_TOML);
        let cli = cli(&["--stale-duration", "9m"]);

        let result = Config::from_raw(&cli, Some(&toml), &UnreachableFs);

        assert!(matches!(result, Err(ConfigError::Invariant(ref e)) if e.field() == "stale_duration"));
    }
}

mod log_level {
    use super::*;

    #[test]
    fn default_is_info() {
        let level = Config::resolve_log_level(&cli(&[]), None).unwrap();
        assert_eq!(level, LogLevel::Info);
    }

    #[test]
    fn cli_overrides_toml() {
        let toml = toml(FULL_TOML);
        let level = Config::resolve_log_level(&cli(&["--log-level", "trace"]), Some(&toml)).unwrap();

        assert_eq!(level, LogLevel::Trace);
    }

    #[test]
    fn unknown_level_is_a_startup_error() {
        let result = Config::from_raw(&cli(&["-s", "AA", "--log-level", "loud"]), None, &UnreachableFs);

        assert!(matches!(
            result,
            Err(ConfigError::InvalidLogLevel { ref value }) if value == "loud"
        ));
    }

    #[test]
    fn log_level_checked_before_sensors() {
        let result = Config::from_raw(&cli(&["-s", "", "--log-level", "loud"]), None, &UnreachableFs);

        assert!(matches!(result, Err(ConfigError::InvalidLogLevel { .. })));
    }
}
