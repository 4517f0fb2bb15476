//! Sensor resolution.
//!
//! Produces the ordered list of sensors to poll from exactly one of two
//! sources ([`SensorSource`]):
//!
//! - **Directory**: every `*.json` record file in a directory, one sensor per
//!   file. Unreadable or malformed files are skipped and reported in
//!   [`Resolution::skipped`]; only a failure to list the directory is fatal.
//! - **Explicit list**: `--sensor` tokens of the form `address` or
//!   `name=address`. Any invalid token fails the whole list.

mod descriptor;
mod error;
pub mod record;
mod source;


pub use descriptor::{Sensor, Thresholds};
pub use error::{RecordError, SourceError, TokenParseError};
pub use source::{
    DirEntry, Resolution, ResolveError, SensorFs, SensorSource, SkippedRecord, StdFs,
    parse_tokens, read_directory, resolve,
};
