//! # MassLynx ASCII Record Parser
//!
//! Turns the text of one MassLynx "Export to ASCII" file into a flat sequence
//! of [`MeasurementRecord`]s, in file order.
//!
//! ## Input format
//!
//! The export is line oriented. Blank lines are skipped and every other line is
//! trimmed and matched against, in this order:
//!
//! | Pattern (case-insensitive) | Effect |
//! |----------------------------|--------|
//! | `FUNCTION <int>` | start a function block; clears time and scan |
//! | `Scan <int>` | set the current scan |
//! | `Retention Time <number>` | set the current retention time |
//! | `<number> <number>` | emit a record if function and time are both known |
//!
//! Lines matching none of these are ignored. Data pairs seen before the first
//! `FUNCTION` marker, or before the first `Retention Time` of the current block,
//! are dropped without error.
//!
//! ```text
//! FUNCTION 2
//! Scan 1
//! Retention Time 0.017
//! 220.0000   1534
//! 254.0000   876
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use masslynx_xlsx::parser::parse_records;
//! use masslynx_xlsx::record::SourceInfo;
//!
//! let text = "FUNCTION 1\nRetention Time 1.234\n100.0 50.0\n";
//! let records = parse_records(text, &SourceInfo::named("A.txt"));
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].channel_id, "MS");
//! ```

use std::fs;
use std::io;
use std::path::Path;

use log::debug;

use crate::record::{MeasurementRecord, SourceInfo};

mod decode;
mod line;


pub use decode::{decode_lossy, DecodedText};
pub use line::{classify_line, LineKind};

/// Mutable context carried from line to line while scanning one file.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ParseState {
    /// Function block currently in effect
    pub function: Option<i64>,
    /// Retention time of the current block
    pub time: Option<f64>,
    /// Scan number of the current block
    pub scan: Option<i64>,
}

impl ParseState {
    /// Advance the state by one classified line, returning the record it produces.
    pub fn step(&mut self, kind: LineKind, source: &SourceInfo) -> Option<MeasurementRecord> {
        match kind {
            LineKind::Function(function) => {
                *self = ParseState {
                    function: Some(function),
                    time: None,
                    scan: None,
                };
                None
            }
            LineKind::Scan(scan) => {
                self.scan = Some(scan);
                None
            }
            LineKind::RetentionTime(time) => {
                self.time = Some(time);
                None
            }
            LineKind::DataPair(first, second) => {
                let function = self.function?;
                let time = self.time?;
                Some(MeasurementRecord::from_pair(
                    function, self.scan, time, first, second, source,
                ))
            }
            LineKind::Unrecognized => None,
        }
    }
}

/// Parse the full text of one file into records.
///
/// Both `\n` and `\r` end a line, so Windows and classic Mac exports parse the same.
pub fn parse_records(text: &str, source: &SourceInfo) -> Vec<MeasurementRecord> {
    let (_, records) = text
        .split(['\n', '\r'])
        .filter_map(classify_line)
        .fold(
            (ParseState::default(), Vec::new()),
            |(mut state, mut records), kind| {
                if let Some(record) = state.step(kind, source) {
                    records.push(record);
                }
                (state, records)
            },
        );

    records
}

/// Records parsed from one file on disk.
#[derive(Debug, Clone)]
pub struct ParsedFile {
    /// Provenance of the file
    pub source: SourceInfo,
    /// Records in file order
    pub records: Vec<MeasurementRecord>,
    /// Invalid UTF-8 bytes dropped while decoding
    pub dropped_bytes: usize,
}

impl ParsedFile {
    /// Whether the file produced no records at all.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Read and parse one file. Only I/O failures are errors; undecodable bytes are dropped.
pub fn parse_file(path: &Path) -> io::Result<ParsedFile> {
    let bytes = fs::read(path)?;
    let decoded = decode_lossy(&bytes);
    if decoded.dropped_bytes > 0 {
        debug!(
            "{}: dropped {} undecodable byte(s)",
            path.display(),
            decoded.dropped_bytes
        );
    }

    let source = SourceInfo::from_path(path);
    let records = parse_records(&decoded.text, &source);
    debug!("{}: parsed {} record(s)", path.display(), records.len());

    Ok(ParsedFile {
        source,
        records,
        dropped_bytes: decoded.dropped_bytes,
    })
}
