//! TOML configuration file support.
//!
//! Settings that would otherwise be repeated on every invocation can live in a
//! config file passed with `--config`:
//!
//! ```toml
//! # masslynx.toml
//! [conversion]
//! recursive = true
//! sheet_prefix = "Day1_"
//! time_decimals = 2
//! output = "day1.xlsx"
//! extension = "txt"
//! ```
//!
//! Flags given on the command line win over the file.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Root configuration structure for config files.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Conversion-specific settings.
    #[serde(default)]
    pub conversion: FileConversionConfig,
}

/// The `[conversion]` table. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConversionConfig {
    /// Scan subdirectories.
    pub recursive: Option<bool>,

    /// Prefix for every data sheet name.
    pub sheet_prefix: Option<String>,

    /// Decimals of the retention-time grid.
    pub time_decimals: Option<u32>,

    /// Output workbook name, resolved against the input directory.
    pub output: Option<PathBuf>,

    /// Input file extension.
    pub extension: Option<String>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }
}
