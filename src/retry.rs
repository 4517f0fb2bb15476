//! Backoff policy for failed sensor reads.
//!
//! The policy is only described here; the poller applies it.

use std::time::Duration;

use crate::config::InvariantError;

#[cfg(test)]
#[path = "retry_tests.rs"]
mod tests;

/// Exponential backoff between retries of a failed sensor read.
///
/// The wait starts at `min_delay`, is multiplied by `factor` after every
/// failed attempt and never exceeds `max_delay`.
///
/// # Defaults
///
/// - `min_delay`: 30 seconds
/// - `max_delay`: 30 minutes
/// - `factor`: 2.0
///
/// # Example
///
/// ```
/// use flowercare_agent::retry::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::new()
///     .with_min_delay(Duration::from_secs(60))
///     .with_factor(1.5);
///
/// assert!(policy.validate().is_ok());
/// assert_eq!(policy.delay_for_retry(1), Duration::from_secs(90));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Wait before the first retry.
    pub min_delay: Duration,

    /// Upper bound for any single wait.
    pub max_delay: Duration,

    /// Growth factor applied after each retry.
    pub factor: f64,
}

impl RetryPolicy {
    /// Lowest accepted `min_delay`.
    pub const MIN_DELAY_FLOOR: Duration = Duration::from_secs(30);

    /// Default minimum delay (30 seconds).
    pub const DEFAULT_MIN_DELAY: Duration = Duration::from_secs(30);

    /// Default maximum delay (30 minutes).
    pub const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(30 * 60);

    /// Default factor (2.0).
    pub const DEFAULT_FACTOR: f64 = 2.0;

    /// Creates a new retry policy with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            min_delay: Self::DEFAULT_MIN_DELAY,
            max_delay: Self::DEFAULT_MAX_DELAY,
            factor: Self::DEFAULT_FACTOR,
        }
    }

    /// Sets the minimum delay.
    #[must_use]
    pub const fn with_min_delay(mut self, delay: Duration) -> Self {
        self.min_delay = delay;
        self
    }

    /// Sets the maximum delay.
    #[must_use]
    pub const fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Sets the growth factor.
    #[must_use]
    pub const fn with_factor(mut self, factor: f64) -> Self {
        self.factor = factor;
        self
    }

    /// Checks the policy invariants in order: minimum floor, max >= min,
    /// factor >= 1.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantError`] that does not hold.
    pub fn validate(&self) -> Result<(), InvariantError> {
        if self.min_delay < Self::MIN_DELAY_FLOOR {
            return Err(InvariantError::RetryMinTooShort {
                min: self.min_delay,
                floor: Self::MIN_DELAY_FLOOR,
            });
        }

        if self.max_delay < self.min_delay {
            return Err(InvariantError::RetryMaxBelowMin {
                min: self.min_delay,
                max: self.max_delay,
            });
        }

        // NaN fails this comparison too
        if !(self.factor >= 1.0 && self.factor.is_finite()) {
            return Err(InvariantError::RetryFactor {
                factor: self.factor,
            });
        }

        Ok(())
    }

    /// Computes the wait before a given retry (0-indexed), capped at
    /// `max_delay`.
    #[must_use]
    pub fn delay_for_retry(&self, retry: u32) -> Duration {
        let exponent = i32::try_from(retry).unwrap_or(i32::MAX);
        let delay_secs = self.min_delay.as_secs_f64() * self.factor.powi(exponent);
        let capped = delay_secs.min(self.max_delay.as_secs_f64());
        Duration::from_secs_f64(capped)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new()
    }
}
