//! Sensor descriptor and `--sensor` token parsing.

use std::fmt;
use std::str::FromStr;

use super::TokenParseError;

/// Alert thresholds for one sensor.
///
/// Zero means "no alert" for every field; the model does not distinguish
/// an unset threshold from a threshold of zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Thresholds {
    /// Upper soil moisture bound (%)
    pub max_soil_moist: i64,
    /// Lower soil moisture bound (%)
    pub min_soil_moist: i64,
    /// Upper soil conductivity bound (µS/cm)
    pub max_soil_ec: i64,
    /// Lower soil conductivity bound (µS/cm)
    pub min_soil_ec: i64,
    /// Upper light intensity bound (lux)
    pub max_light_lux: i64,
    /// Lower light intensity bound (lux)
    pub min_light_lux: i64,
}

impl Thresholds {
    /// Returns `true` if no threshold is configured.
    #[must_use]
    pub fn is_unset(&self) -> bool {
        *self == Self::default()
    }
}

/// One physical sensor to poll.
///
/// Built either from a `name=address` token (thresholds unset) or from a
/// sensor record file. The address is never empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sensor {
    /// Display name, empty when the sensor is unnamed
    pub name: String,

    /// Hardware (MAC) address
    pub address: String,

    /// Alert thresholds
    pub thresholds: Thresholds,
}

impl Sensor {
    /// Creates a sensor with the given name and address and no thresholds.
    #[must_use]
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            thresholds: Thresholds::default(),
        }
    }

    /// Sets the alert thresholds.
    #[must_use]
    pub const fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }
}

impl fmt::Display for Sensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            write!(f, "{}", self.address)
        } else {
            write!(f, "{} ({})", self.name, self.address)
        }
    }
}

impl FromStr for Sensor {
    type Err = TokenParseError;

    /// Parses `address` or `name=address`.
    ///
    /// Only the first `=` separates name from address, so the address
    /// itself may contain `=`.
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        if token.is_empty() {
            return Err(TokenParseError::Empty);
        }

        match token.split_once('=') {
            None => Ok(Self::new("", token)),
            Some((_, "")) => Err(TokenParseError::MissingAddress {
                token: token.to_string(),
            }),
            Some((name, address)) => Ok(Self::new(name, address)),
        }
    }
}
