use std::path::{Path, PathBuf};

use crate::align::DEFAULT_TIME_DECIMALS;
use crate::discovery::DEFAULT_EXTENSION;
use crate::error::ConvertError;

/// Default workbook file name, created inside the input directory.
pub const DEFAULT_OUTPUT_NAME: &str = "combined_by_channel_wide.xlsx";

/// Largest accepted grid precision. Beyond this, f64 times carry no more digits.
pub const MAX_TIME_DECIMALS: u32 = 12;

/// Settings of one conversion run
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionConfig {
    /// Scan subdirectories of the input root
    pub recursive: bool,

    /// Prepended to every data sheet name
    pub sheet_prefix: String,

    /// Decimals of the retention-time grid
    pub time_decimals: u32,

    /// Output file name, resolved against the input root
    pub output_name: PathBuf,

    /// Extension of input files (without the dot)
    pub extension: String,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            recursive: false,
            sheet_prefix: String::new(),
            time_decimals: DEFAULT_TIME_DECIMALS,
            output_name: PathBuf::from(DEFAULT_OUTPUT_NAME),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }
}

impl ConversionConfig {
    /// Scan subdirectories
    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Set the sheet name prefix
    pub fn with_sheet_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.sheet_prefix = prefix.into();
        self
    }

    /// Set the grid precision
    pub fn with_time_decimals(mut self, decimals: u32) -> Self {
        self.time_decimals = decimals;
        self
    }

    /// Set the output file name
    pub fn with_output_name(mut self, name: impl Into<PathBuf>) -> Self {
        self.output_name = name.into();
        self
    }

    /// Set the input file extension
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into().trim_start_matches('.').to_string();
        self
    }

    /// Reject settings that cannot produce a sensible workbook
    pub fn validate(&self) -> Result<(), ConvertError> {
        if self.time_decimals > MAX_TIME_DECIMALS {
            return Err(ConvertError::InvalidConfig(format!(
                "time_decimals must be at most {}, got {}",
                MAX_TIME_DECIMALS, self.time_decimals
            )));
        }
        if self.output_name.as_os_str().is_empty() {
            return Err(ConvertError::InvalidConfig(
                "output file name is empty".to_string(),
            ));
        }
        if self.extension.is_empty() {
            return Err(ConvertError::InvalidConfig(
                "input extension is empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Where the workbook is written for a given input root
    pub fn output_path(&self, root: &Path) -> PathBuf {
        root.join(&self.output_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ConversionConfig::default();
        assert!(!config.recursive);
        assert_eq!(config.sheet_prefix, "");
        assert_eq!(config.time_decimals, 3);
        assert_eq!(
            config.output_path(Path::new("/data")),
            PathBuf::from("/data/combined_by_channel_wide.xlsx")
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_and_validation() {
        let config = ConversionConfig::default()
            .with_recursive(true)
            .with_sheet_prefix("Day1_")
            .with_extension(".TXT")
            .with_time_decimals(13);
        assert!(config.recursive);
        assert_eq!(config.extension, "TXT");
        assert!(matches!(
            config.validate(),
            Err(ConvertError::InvalidConfig(_))
        ));
    }
}
