//! # Workbook Assembly
//!
//! Orchestrates a run over a directory of MassLynx exports and produces one
//! workbook:
//!
//! ```text
//! combined_by_channel_wide.xlsx
//! ├── F1_MS          # function 1: first m/z pair of each retention time
//! ├── F2_ch-220      # function 2, channel 220
//! ├── F2_ch-254      # function 2, channel 254
//! └── INDEX          # one row per data sheet
//! ```
//!
//! Each data sheet holds a `<file>_time` / `<file>_intensity` column pair per
//! contributing file, aligned on the rounded retention-time grid (see
//! [`crate::align`]).
//!
//! ## Pipeline
//!
//! 1. [`WorkbookAssembler::scan`]: validate the root, discover files, parse
//!    each one in turn into a [`Dataset`](crate::dataset::Dataset)
//! 2. [`WorkbookAssembler::assemble`]: partition, align and name every sheet
//! 3. [`TableSink::write_workbook`]: serialize the finished workbook
//!
//! Nothing is written until step 3, and step 3 is skipped on every fatal path.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use masslynx_xlsx::workbook::{convert_directory, ConversionConfig};
//!
//! let config = ConversionConfig::default()
//!     .with_recursive(true)
//!     .with_sheet_prefix("Day1_");
//! let summary = convert_directory("exports/".as_ref(), &config)?;
//! println!("{}", summary);
//! # Ok::<(), masslynx_xlsx::error::ConvertError>(())
//! ```

use std::path::Path;

mod assembler;
mod config;
mod index;
mod sink;
mod stats;


pub use assembler::{AssembledWorkbook, ChannelSheet, ScanResult, WorkbookAssembler};
pub use config::{ConversionConfig, DEFAULT_OUTPUT_NAME, MAX_TIME_DECIMALS};
pub use index::{sort_index, SheetIndexEntry, INDEX_COLUMNS};
pub use sink::{MemorySink, TableSink, XlsxSink, EXCEL_MAX_COLUMNS, EXCEL_MAX_ROWS};
pub use stats::RunSummary;

use crate::error::ConvertError;

/// Convert every export under `root` into one `.xlsx` workbook inside `root`.
pub fn convert_directory(
    root: &Path,
    config: &ConversionConfig,
) -> Result<RunSummary, ConvertError> {
    let assembler = WorkbookAssembler::new(config.clone());
    let mut sink = XlsxSink::new(config.output_path(root));
    assembler.run(root, &mut sink)
}
