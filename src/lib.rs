//! Flower Care agent configuration.
//!
//! Resolves the runtime configuration of a BLE soil and light sensor
//! polling agent: which sensors to poll, their alert thresholds, the
//! polling intervals and the retry policy for failed reads.

pub mod config;
pub mod retry;
pub mod sensor;
