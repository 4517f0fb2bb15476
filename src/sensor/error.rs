//! Error types for sensor resolution.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// The sensor directory could not be listed.
///
/// Fatal for the directory strategy: without a listing no sensors can be
/// determined.
#[derive(Debug, Error)]
#[error("Failed to list sensor directory '{}': {source}", path.display())]
pub struct SourceError {
    /// Directory that was being listed
    pub path: PathBuf,
    /// Underlying I/O error
    #[source]
    pub source: io::Error,
}

/// A single sensor record could not be turned into a sensor.
///
/// Never fatal: the resolver skips the offending file and keeps going.
#[derive(Debug, Error)]
pub enum RecordError {
    /// The record file could not be read.
    #[error("Failed to read record: {0}")]
    Read(#[source] io::Error),

    /// The record is not valid JSON or has an unexpected shape.
    #[error("Failed to decode record: {0}")]
    Decode(#[source] serde_json::Error),

    /// The record decoded but carries no hardware address.
    #[error("Record has no sensor address")]
    MissingAddress,
}

/// A `--sensor` token could not be parsed.
///
/// Operator-supplied tokens are assumed intentional, so this aborts
/// configuration resolution instead of being skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenParseError {
    /// The token was the empty string.
    #[error("empty string")]
    Empty,

    /// The token had a name but nothing after the `=`.
    #[error("missing address in '{token}'")]
    MissingAddress {
        /// The offending token
        token: String,
    },
}
