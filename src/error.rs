//! Errors that end a conversion run.

use std::path::PathBuf;

/// Errors that end a conversion run
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// Input root does not exist or is not a directory
    #[error("Not a directory: {}", .0.display())]
    InvalidRoot(PathBuf),

    /// No input files matched; nothing to do
    #[error("No .{extension} files found under {} (recursive={recursive})", .root.display())]
    NoInputFiles {
        /// Scanned root
        root: PathBuf,
        /// Whether subdirectories were scanned
        recursive: bool,
        /// Extension that was matched
        extension: String,
    },

    /// Every discovered file yielded zero records
    #[error("No data parsed from any of {files} file(s). Nothing to write.")]
    NoData {
        /// Number of files that were scanned
        files: usize,
    },

    /// Invalid conversion settings
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A channel table exceeds Excel's worksheet limits
    #[error("Sheet {sheet} has {rows} rows and {columns} columns, beyond Excel limits")]
    SheetTooLarge {
        /// Sheet name
        sheet: String,
        /// Data rows
        rows: usize,
        /// Columns
        columns: usize,
    },

    /// I/O error while writing output
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from the xlsx writer
    #[error("Workbook error: {0}")]
    XlsxError(#[from] rust_xlsxwriter::XlsxError),
}

impl ConvertError {
    /// Whether the run failed, as opposed to ending early with nothing to do.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, ConvertError::NoInputFiles { .. })
    }

    /// Process exit code for this outcome.
    pub fn exit_code(&self) -> u8 {
        if self.is_fatal() {
            1
        } else {
            0
        }
    }
}
