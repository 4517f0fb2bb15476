//! Tests for validated configuration.

use std::ffi::OsStr;
use std::io;
use std::path::Path;

use super::ConfigError;
use super::cli::Cli;
use super::toml::TomlConfig;
use super::validated::Config;
use crate::sensor::{DirEntry, SensorFs};

/// Helper to create CLI args from a slice
fn cli(args: &[&str]) -> Cli {
    let mut full_args = vec!["flowercare-agent"];
    full_args.extend(args);
    Cli::parse_from_iter(full_args)
}

/// Helper to parse TOML config
fn toml(content: &str) -> TomlConfig {
    TomlConfig::parse(content).unwrap()
}

/// In-memory sensor directory: every listed directory holds the same files.
#[derive(Default)]
struct FakeFs {
    files: Vec<(&'static str, String)>,
}

impl FakeFs {
    fn with_record(mut self, file_name: &'static str, name: &str, address: &str) -> Self {
        self.files.push((
            file_name,
            format!(r#"{{"name": "{name}", "sensor": "{address}"}}"#),
        ));
        self
    }

    fn with_file(mut self, file_name: &'static str, content: &str) -> Self {
        self.files.push((file_name, content.to_string()));
        self
    }
}

impl SensorFs for FakeFs {
    fn list(&self, _dir: &Path) -> io::Result<Vec<DirEntry>> {
        Ok(self
            .files
            .iter()
            .map(|(file_name, _)| DirEntry {
                file_name: (*file_name).into(),
                is_dir: false,
            })
            .collect())
    }

    fn read(&self, path: &Path) -> io::Result<String> {
        self.files
            .iter()
            .find(|(file_name, _)| path.file_name().is_some_and(|n| n == OsStr::new(*file_name)))
            .map(|(_, content)| content.clone())
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "missing"))
    }
}

/// Filesystem that fails every call; for runs that must not scan a directory.
struct UnreachableFs;

impl SensorFs for UnreachableFs {
    fn list(&self, _dir: &Path) -> io::Result<Vec<DirEntry>> {
        Err(io::Error::new(io::ErrorKind::NotFound, "no such directory"))
    }

    fn read(&self, _path: &Path) -> io::Result<String> {
        Err(io::Error::new(io::ErrorKind::NotFound, "no such file"))
    }
}

mod precedence_tests;
