//! Sensor source selection and resolution.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use super::record::{decode_record, is_record_name};
use super::{RecordError, Sensor, SourceError, TokenParseError};

/// Where the sensors for this run come from.
///
/// The two strategies are mutually exclusive and never merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SensorSource {
    /// Scan a directory for sensor record files.
    Directory(PathBuf),

    /// Parse operator-supplied `address` / `name=address` tokens.
    ExplicitList(Vec<String>),
}

impl SensorSource {
    /// Returns the directory for the directory strategy.
    #[must_use]
    pub fn directory(&self) -> Option<&Path> {
        match self {
            Self::Directory(path) => Some(path),
            Self::ExplicitList(_) => None,
        }
    }
}

/// One entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// File name without the directory part, as returned by the OS
    pub file_name: OsString,
    /// Whether the entry is itself a directory
    pub is_dir: bool,
}

/// Filesystem access used by the directory strategy.
///
/// Lets the resolver run against an in-memory tree in tests.
pub trait SensorFs {
    /// Lists the entries of `dir` (non-recursive), in listing order.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the directory cannot be listed.
    fn list(&self, dir: &Path) -> io::Result<Vec<DirEntry>>;

    /// Reads a file to a string.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the file cannot be read.
    fn read(&self, path: &Path) -> io::Result<String>;
}

/// [`SensorFs`] backed by the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFs;

impl SensorFs for StdFs {
    fn list(&self, dir: &Path) -> io::Result<Vec<DirEntry>> {
        std::fs::read_dir(dir)?
            .map(|entry| -> io::Result<DirEntry> {
                let entry = entry?;
                Ok(DirEntry {
                    file_name: entry.file_name(),
                    is_dir: entry.file_type()?.is_dir(),
                })
            })
            .collect()
    }

    fn read(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}

/// A record file that was skipped during directory resolution.
#[derive(Debug)]
pub struct SkippedRecord {
    /// Full path of the skipped file
    pub path: PathBuf,
    /// Why it was skipped
    pub error: RecordError,
}

/// Outcome of sensor resolution.
#[derive(Debug, Default)]
pub struct Resolution {
    /// Resolved sensors, in source order
    pub sensors: Vec<Sensor>,
    /// Record files that could not be used
    pub skipped: Vec<SkippedRecord>,
}

/// Error returned by [`resolve`].
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The sensor directory could not be listed.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// A `--sensor` token was invalid.
    #[error("Can not parse sensor: {0}")]
    Token(#[from] TokenParseError),
}

/// Resolves the sensors for `source`.
///
/// An empty result is not an error here.
///
/// # Errors
///
/// Returns [`ResolveError::Source`] if the directory cannot be listed and
/// [`ResolveError::Token`] for the first invalid token.
pub fn resolve(source: &SensorSource, fs: &impl SensorFs) -> Result<Resolution, ResolveError> {
    match source {
        SensorSource::Directory(dir) => Ok(read_directory(dir, fs)?),
        SensorSource::ExplicitList(tokens) => {
            let sensors = parse_tokens(tokens)?;
            Ok(Resolution {
                sensors,
                skipped: Vec::new(),
            })
        }
    }
}

/// Parses every token in order; the first bad token fails the whole list.
///
/// # Errors
///
/// Returns the [`TokenParseError`] of the first invalid token.
pub fn parse_tokens<S: AsRef<str>>(tokens: &[S]) -> Result<Vec<Sensor>, TokenParseError> {
    tokens.iter().map(|t| t.as_ref().parse()).collect()
}

/// Loads every record file in `dir`, skipping the ones that fail.
///
/// # Errors
///
/// Returns [`SourceError`] only if `dir` itself cannot be listed.
pub fn read_directory(dir: &Path, fs: &impl SensorFs) -> Result<Resolution, SourceError> {
    let entries = fs.list(dir).map_err(|source| SourceError {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut resolution = Resolution::default();

    for entry in entries {
        let path = dir.join(&entry.file_name);
        tracing::debug!(path = %path.display(), is_dir = entry.is_dir, "Sensor directory entry");

        if entry.is_dir || !is_record_name(&entry.file_name) {
            continue;
        }

        let loaded = fs
            .read(&path)
            .map_err(RecordError::Read)
            .and_then(|content| decode_record(&content));

        match loaded {
            Ok(sensor) => {
                tracing::debug!(path = %path.display(), %sensor, "Loaded sensor record");
                resolution.sensors.push(sensor);
            }
            Err(error) => {
                tracing::warn!(path = %path.display(), "Skipping sensor record: {error}");
                resolution.skipped.push(SkippedRecord { path, error });
            }
        }
    }

    Ok(resolution)
}
