//! Duration strings in the `1m30s` / `300ms` / `1.5h` style.
//!
//! Accepted units are `ns`, `us` (also `µs`), `ms`, `s`, `m` and `h`.
//! Components may be chained (`1h15m`) and may carry a fraction (`1.5h`).
//! A bare `0` is the only unit-less value accepted. Negative durations are
//! rejected.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Deserializer};
use thiserror::Error;

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Fraction digits beyond this are ignored (below nanosecond precision).
const MAX_FRACTION_DIGITS: u32 = 18;

/// Error returned by [`parse`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationParseError {
    /// Input was empty.
    #[error("empty duration")]
    Empty,

    /// Input started with `-`.
    #[error("negative duration '{0}'")]
    Negative(String),

    /// A number was expected.
    #[error("invalid duration '{0}'")]
    Invalid(String),

    /// A number had no unit after it.
    #[error("missing unit in duration '{0}'")]
    MissingUnit(String),

    /// A unit was not recognised.
    #[error("unknown unit '{unit}' in duration '{value}'")]
    UnknownUnit {
        /// The unrecognised unit
        unit: String,
        /// The full input
        value: String,
    },

    /// Value does not fit in a `Duration` of `u64` nanoseconds.
    #[error("duration '{0}' is too large")]
    Overflow(String),
}

fn unit_nanos(unit: &str) -> Option<u128> {
    match unit {
        "ns" => Some(1),
        "us" | "µs" | "μs" => Some(NANOS_PER_MICRO),
        "ms" => Some(NANOS_PER_MILLI),
        "s" => Some(NANOS_PER_SEC),
        "m" => Some(60 * NANOS_PER_SEC),
        "h" => Some(3600 * NANOS_PER_SEC),
        _ => None,
    }
}

/// Parses a duration string such as `2m`, `1m30s` or `1.5h`.
///
/// # Errors
///
/// Returns a [`DurationParseError`] describing the first problem found.
pub fn parse(input: &str) -> Result<Duration, DurationParseError> {
    let value = input.trim();
    let invalid = || DurationParseError::Invalid(value.to_string());

    let rest = match value.as_bytes().first() {
        None => return Err(DurationParseError::Empty),
        Some(b'-') => return Err(DurationParseError::Negative(value.to_string())),
        Some(b'+') => &value[1..],
        Some(_) => value,
    };

    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() {
        return Err(invalid());
    }

    let mut total: u128 = 0;
    let mut rest = rest;

    while !rest.is_empty() {
        let int_len = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
        let (int_part, after_int) = rest.split_at(int_len);

        let (frac_part, after_number) = match after_int.strip_prefix('.') {
            Some(after_dot) => {
                let frac_len = after_dot
                    .find(|c: char| !c.is_ascii_digit())
                    .unwrap_or(after_dot.len());
                after_dot.split_at(frac_len)
            }
            None => ("", after_int),
        };

        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid());
        }

        let unit_len = after_number
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(after_number.len());
        let (unit, next) = after_number.split_at(unit_len);

        if unit.is_empty() {
            return Err(DurationParseError::MissingUnit(value.to_string()));
        }
        let scale = unit_nanos(unit).ok_or_else(|| DurationParseError::UnknownUnit {
            unit: unit.to_string(),
            value: value.to_string(),
        })?;

        let overflow = || DurationParseError::Overflow(value.to_string());

        let whole: u128 = if int_part.is_empty() {
            0
        } else {
            int_part.parse().map_err(|_| overflow())?
        };
        let mut component = whole.checked_mul(scale).ok_or_else(overflow)?;

        if !frac_part.is_empty() {
            let digits = &frac_part[..frac_part.len().min(MAX_FRACTION_DIGITS as usize)];
            let numerator: u128 = digits.parse().map_err(|_| invalid())?;
            #[allow(clippy::cast_possible_truncation)] // bounded by MAX_FRACTION_DIGITS
            let denominator = 10u128.pow(digits.len() as u32);
            component = component
                .checked_add(numerator * scale / denominator)
                .ok_or_else(overflow)?;
        }

        total = total.checked_add(component).ok_or_else(overflow)?;
        rest = next;
    }

    let nanos = u64::try_from(total).map_err(|_| DurationParseError::Overflow(value.to_string()))?;
    Ok(Duration::from_nanos(nanos))
}

/// Displays a [`Duration`] in the same style [`parse`] accepts.
///
/// ```
/// use std::time::Duration;
/// use flowercare_agent::config::duration::Formatted;
///
/// assert_eq!(Formatted(Duration::from_secs(90)).to_string(), "1m30s");
/// assert_eq!(Formatted(Duration::from_millis(1500)).to_string(), "1.5s");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Formatted(pub Duration);

impl fmt::Display for Formatted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nanos = self.0.as_nanos();

        if nanos == 0 {
            return f.write_str("0s");
        }
        if nanos < NANOS_PER_MICRO {
            return write!(f, "{nanos}ns");
        }
        if nanos < NANOS_PER_MILLI {
            return write!(f, "{}µs", decimal(nanos / NANOS_PER_MICRO, nanos % NANOS_PER_MICRO, 3));
        }
        if nanos < NANOS_PER_SEC {
            return write!(f, "{}ms", decimal(nanos / NANOS_PER_MILLI, nanos % NANOS_PER_MILLI, 6));
        }

        let secs = self.0.as_secs();
        let hours = secs / 3600;
        let minutes = (secs % 3600) / 60;
        let seconds = decimal(u128::from(secs % 60), u128::from(self.0.subsec_nanos()), 9);

        if hours > 0 {
            write!(f, "{hours}h{minutes}m{seconds}s")
        } else if minutes > 0 {
            write!(f, "{minutes}m{seconds}s")
        } else {
            write!(f, "{seconds}s")
        }
    }
}

/// `whole.frac` with trailing fraction zeros dropped.
fn decimal(whole: u128, frac: u128, width: usize) -> String {
    if frac == 0 {
        return whole.to_string();
    }
    let frac = format!("{frac:0width$}");
    format!("{whole}.{}", frac.trim_end_matches('0'))
}

/// Serde helper for optional duration strings in config files.
///
/// # Errors
///
/// Returns a deserialization error if the string is not a valid duration.
pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|s| parse(&s).map_err(serde::de::Error::custom))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    mod parsing {
        use super::*;

        #[test]
        fn single_units() {
            assert_eq!(parse("30s"), Ok(Duration::from_secs(30)));
            assert_eq!(parse("2m"), Ok(Duration::from_secs(120)));
            assert_eq!(parse("1h"), Ok(Duration::from_secs(3600)));
            assert_eq!(parse("300ms"), Ok(Duration::from_millis(300)));
            assert_eq!(parse("15us"), Ok(Duration::from_micros(15)));
            assert_eq!(parse("15µs"), Ok(Duration::from_micros(15)));
            assert_eq!(parse("7ns"), Ok(Duration::from_nanos(7)));
        }

        #[test]
        fn chained_components() {
            assert_eq!(parse("1m30s"), Ok(Duration::from_secs(90)));
            assert_eq!(parse("2h45m"), Ok(Duration::from_secs(2 * 3600 + 45 * 60)));
            assert_eq!(
                parse("29s999ms"),
                Ok(Duration::from_millis(29_999))
            );
        }

        #[test]
        fn fractions() {
            assert_eq!(parse("1.5h"), Ok(Duration::from_secs(5400)));
            assert_eq!(parse(".5s"), Ok(Duration::from_millis(500)));
            assert_eq!(parse("1.s"), Ok(Duration::from_secs(1)));
        }

        #[test]
        fn zero_and_sign() {
            assert_eq!(parse("0"), Ok(Duration::ZERO));
            assert_eq!(parse("+0"), Ok(Duration::ZERO));
            assert_eq!(parse("0s"), Ok(Duration::ZERO));
            assert_eq!(parse("+5s"), Ok(Duration::from_secs(5)));
        }

        #[test]
        fn surrounding_whitespace_is_ignored() {
            assert_eq!(parse(" 2m "), Ok(Duration::from_secs(120)));
        }

        #[test]
        fn rejects_bad_input() {
            assert_eq!(parse(""), Err(DurationParseError::Empty));
            assert_eq!(
                parse("-1s"),
                Err(DurationParseError::Negative("-1s".to_string()))
            );
            assert_eq!(
                parse("30"),
                Err(DurationParseError::MissingUnit("30".to_string()))
            );
            assert_eq!(
                parse("5d"),
                Err(DurationParseError::UnknownUnit {
                    unit: "d".to_string(),
                    value: "5d".to_string()
                })
            );
            assert_eq!(parse("s"), Err(DurationParseError::Invalid("s".to_string())));
            assert_eq!(parse("."), Err(DurationParseError::Invalid(".".to_string())));
            assert_eq!(parse("+"), Err(DurationParseError::Invalid("+".to_string())));
        }

        #[test]
        fn rejects_overflow() {
            assert!(matches!(
                parse("99999999999999h"),
                Err(DurationParseError::Overflow(_))
            ));
            assert!(matches!(
                parse("94522879700260684295381835.9h"),
                Err(DurationParseError::Overflow(_))
            ));
        }
    }

    mod formatting {
        use super::*;

        fn fmt(d: Duration) -> String {
            Formatted(d).to_string()
        }

        #[test]
        fn sub_second() {
            assert_eq!(fmt(Duration::ZERO), "0s");
            assert_eq!(fmt(Duration::from_nanos(42)), "42ns");
            assert_eq!(fmt(Duration::from_nanos(1_500)), "1.5µs");
            assert_eq!(fmt(Duration::from_millis(250)), "250ms");
        }

        #[test]
        fn seconds_and_up() {
            assert_eq!(fmt(Duration::from_secs(30)), "30s");
            assert_eq!(fmt(Duration::from_millis(29_999)), "29.999s");
            assert_eq!(fmt(Duration::from_secs(240)), "4m0s");
            assert_eq!(fmt(Duration::from_secs(7200)), "2h0m0s");
            assert_eq!(fmt(Duration::from_secs(3725)), "1h2m5s");
        }

        #[test]
        fn output_parses_back() {
            for d in [
                Duration::from_millis(1_500),
                Duration::from_secs(5 * 60),
                Duration::from_nanos(119_999_999_999),
            ] {
                assert_eq!(parse(&fmt(d)), Ok(d));
            }
        }
    }
}
