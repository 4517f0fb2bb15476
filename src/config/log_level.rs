//! Minimum log severity.

use std::fmt;
use std::str::FromStr;

use tracing::Level;

use super::ConfigError;

/// Minimum severity of log messages to emit.
///
/// `fatal` and `panic` are accepted for compatibility with existing
/// deployments and behave like `error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LogLevel {
    /// Everything
    Trace,
    /// Debugging details
    Debug,
    /// Normal operation
    #[default]
    Info,
    /// Recoverable problems
    Warn,
    /// Failures
    Error,
    /// Alias of `Error`
    Fatal,
    /// Alias of `Error`
    Panic,
}

impl LogLevel {
    /// All accepted names, for diagnostics.
    pub const NAMES: &'static [&'static str] =
        &["trace", "debug", "info", "warn", "error", "fatal", "panic"];

    /// Returns the `tracing` level filter equivalent.
    #[must_use]
    pub const fn as_tracing(self) -> Level {
        match self {
            Self::Trace => Level::TRACE,
            Self::Debug => Level::DEBUG,
            Self::Info => Level::INFO,
            Self::Warn => Level::WARN,
            Self::Error | Self::Fatal | Self::Panic => Level::ERROR,
        }
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Fatal => "fatal",
            Self::Panic => "panic",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            "fatal" => Ok(Self::Fatal),
            "panic" => Ok(Self::Panic),
            _ => Err(ConfigError::InvalidLogLevel {
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_name() {
        for name in LogLevel::NAMES {
            let level: LogLevel = name.parse().unwrap();
            assert_eq!(level.to_string(), *name);
        }
    }

    #[test]
    fn parsing_is_case_insensitive() {
        assert_eq!("DEBUG".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert_eq!("Warning".parse::<LogLevel>().unwrap(), LogLevel::Warn);
    }

    #[test]
    fn unknown_name_is_rejected() {
        let result = "verbose".parse::<LogLevel>();

        assert!(matches!(
            result,
            Err(ConfigError::InvalidLogLevel { ref value }) if value == "verbose"
        ));
    }

    #[test]
    fn rejection_lists_every_name() {
        let message = "verbose".parse::<LogLevel>().unwrap_err().to_string();

        assert_eq!(
            message,
            "Invalid log level 'verbose': expected one of trace, debug, info, warn, error, fatal, panic"
        );
        for name in LogLevel::NAMES {
            assert!(message.contains(name));
        }
    }

    #[test]
    fn default_is_info() {
        assert_eq!(LogLevel::default(), LogLevel::Info);
    }

    #[test]
    fn severe_aliases_map_to_error() {
        assert_eq!(LogLevel::Fatal.as_tracing(), Level::ERROR);
        assert_eq!(LogLevel::Panic.as_tracing(), Level::ERROR);
        assert_eq!(LogLevel::Trace.as_tracing(), Level::TRACE);
    }
}
