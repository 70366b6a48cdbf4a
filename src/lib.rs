//! # masslynx-xlsx
//!
//! Combines Waters MassLynx "Export to ASCII" files into a single Excel
//! workbook: one worksheet per instrument channel, with a time/intensity column
//! pair for every source file, aligned on a shared retention-time grid.
//!
//! ## Key Features
//!
//! - **Tolerant parsing**: unknown lines are skipped and undecodable bytes are
//!   dropped, so one odd header never costs a file its data.
//!
//! - **Channel partitioning**: function 1 is read as MS `(m/z, intensity)`;
//!   every other function as `(channel, intensity)` traces such as PDA/UV
//!   wavelengths, one sheet per channel.
//!
//! - **Grid alignment**: retention times are rounded to a configurable number
//!   of decimals to build a common row axis, while each file keeps its exact
//!   times in its own column.
//!
//! - **Excel-safe naming**: sheet names are sanitized, truncated to 31
//!   characters and de-duplicated.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use masslynx_xlsx::workbook::{convert_directory, ConversionConfig};
//!
//! let config = ConversionConfig::default().with_time_decimals(2);
//! let summary = convert_directory("C:/MassLynx Data/TXT files".as_ref(), &config)?;
//! println!("{}", summary);
//! # Ok::<(), masslynx_xlsx::error::ConvertError>(())
//! ```
//!
//! ## Architecture
//!
//! - [`parser`]: line classification and the stateful record scan
//! - [`record`]: the [`MeasurementRecord`](record::MeasurementRecord) data model
//! - [`dataset`]: aggregation of all files and partitioning by channel
//! - [`align`]: the wide, grid-aligned table of one channel
//! - [`naming`]: channel labels and Excel sheet names
//! - [`discovery`]: input file discovery
//! - [`workbook`]: run orchestration and xlsx output
//! - [`report`]: per-file scan report
//! - [`error`]: run-level error taxonomy

#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod align;
pub mod dataset;
pub mod discovery;
pub mod error;
pub mod naming;
pub mod parser;
pub mod record;
pub mod report;
pub mod workbook;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::align::{
        build_wide_table, Sample, SourceColumns, WideTable, DEFAULT_TIME_DECIMALS,
    };
    pub use crate::dataset::{ChannelPartition, Dataset, DatasetBuilder};
    pub use crate::error::ConvertError;
    pub use crate::naming::{channel_label, SheetNamer, INDEX_SHEET_NAME, MAX_SHEET_NAME_LEN};
    pub use crate::parser::{parse_file, parse_records, ParseState};
    pub use crate::record::{ChannelKey, MeasurementRecord, SourceInfo};
    pub use crate::report::{FileOutcome, ScanReport};
    pub use crate::workbook::{
        convert_directory, AssembledWorkbook, ConversionConfig, RunSummary, SheetIndexEntry,
        TableSink, WorkbookAssembler, XlsxSink,
    };
}
