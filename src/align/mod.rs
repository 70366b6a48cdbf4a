//! # Time-Grid Alignment
//!
//! Builds the "wide" table for one channel partition: one row per rounded
//! retention time seen in any file, and a `<file>_time` / `<file>_intensity`
//! column pair per source file.
//!
//! Rounding only decides which row a sample lands on. Each file keeps its own
//! raw times in its own `_time` column, so there is no shared time column.
//!
//! ```text
//! grid   A.txt_time  A.txt_intensity  B.txt_time  B.txt_intensity
//! 0.010  0.0101      12.0             -           -
//! 0.020  0.0199      15.0             0.0201      9.0
//! 0.030  -           -                0.0302      11.0
//! ```
//!
//! Within one file, samples whose times round to the same grid point are not
//! merged: the one with the lowest raw time wins and the rest are dropped.

use std::collections::BTreeMap;

use crate::record::MeasurementRecord;


/// Default number of decimals for the retention-time grid.
pub const DEFAULT_TIME_DECIMALS: u32 = 3;

/// Suffix of the per-file time column.
pub const TIME_COLUMN_SUFFIX: &str = "_time";

/// Suffix of the per-file intensity column.
pub const INTENSITY_COLUMN_SUFFIX: &str = "_intensity";

/// The three fields of a record the aligner needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample<'a> {
    /// Column-naming key
    pub source_file: &'a str,
    /// Raw retention time
    pub time: f64,
    /// Intensity
    pub intensity: f64,
}

impl<'a> Sample<'a> {
    /// Create a sample.
    pub fn new(source_file: &'a str, time: f64, intensity: f64) -> Self {
        Self {
            source_file,
            time,
            intensity,
        }
    }
}

impl<'a> From<&'a MeasurementRecord> for Sample<'a> {
    fn from(record: &'a MeasurementRecord) -> Self {
        Self::new(&record.source_file, record.time, record.intensity)
    }
}

/// Round half-to-even at `decimals` places: scale, round, unscale.
///
/// Negative zero is normalized to zero so both land on the same grid point.
pub fn round_to_decimals(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round_ties_even() / scale + 0.0
}

/// The two columns contributed by one source file.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceColumns {
    /// Source file base name
    pub source_file: String,
    /// Raw time per grid row, `None` where the file has no sample
    pub time: Vec<Option<f64>>,
    /// Intensity per grid row, `None` where the file has no sample
    pub intensity: Vec<Option<f64>>,
}

impl SourceColumns {
    /// Header of the time column, e.g. `A.txt_time`.
    pub fn time_column_name(&self) -> String {
        format!("{}{}", self.source_file, TIME_COLUMN_SUFFIX)
    }

    /// Header of the intensity column, e.g. `A.txt_intensity`.
    pub fn intensity_column_name(&self) -> String {
        format!("{}{}", self.source_file, INTENSITY_COLUMN_SUFFIX)
    }

    /// Number of grid rows where this file has a sample.
    pub fn filled_rows(&self) -> usize {
        self.time.iter().filter(|cell| cell.is_some()).count()
    }
}

/// Rectangular, positional table for one channel partition.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WideTable {
    grid: Vec<f64>,
    sources: Vec<SourceColumns>,
}

impl WideTable {
    /// Rounded retention time of each row, ascending.
    pub fn grid(&self) -> &[f64] {
        &self.grid
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.grid.len()
    }

    /// Column pairs in source-file order.
    pub fn sources(&self) -> &[SourceColumns] {
        &self.sources
    }

    /// Column pair of one source file.
    pub fn source(&self, source_file: &str) -> Option<&SourceColumns> {
        self.sources.iter().find(|s| s.source_file == source_file)
    }

    /// Number of columns (two per source file).
    pub fn column_count(&self) -> usize {
        self.sources.len() * 2
    }

    /// Column headers in output order.
    pub fn column_names(&self) -> Vec<String> {
        self.sources
            .iter()
            .flat_map(|s| [s.time_column_name(), s.intensity_column_name()])
            .collect()
    }

    /// Cells of one row in column order.
    pub fn row(&self, index: usize) -> Vec<Option<f64>> {
        self.sources
            .iter()
            .flat_map(|s| [s.time[index], s.intensity[index]])
            .collect()
    }

    /// Iterate over all rows.
    pub fn rows(&self) -> impl Iterator<Item = Vec<Option<f64>>> + '_ {
        (0..self.row_count()).map(|index| self.row(index))
    }
}

#[derive(Debug, Clone, Copy)]
struct RoundedSample {
    time_round: f64,
    time: f64,
    intensity: f64,
}

/// Align the samples of one partition onto their common rounded time grid.
///
/// Source files become column pairs in ascending name order.
pub fn build_wide_table<'a, I>(samples: I, time_decimals: u32) -> WideTable
where
    I: IntoIterator<Item = Sample<'a>>,
{
    let mut grid = Vec::new();
    let mut by_source: BTreeMap<&'a str, Vec<RoundedSample>> = BTreeMap::new();

    for sample in samples {
        let time_round = round_to_decimals(sample.time, time_decimals);
        grid.push(time_round);
        by_source
            .entry(sample.source_file)
            .or_default()
            .push(RoundedSample {
                time_round,
                time: sample.time,
                intensity: sample.intensity,
            });
    }

    grid.sort_by(f64::total_cmp);
    grid.dedup();

    let sources = by_source
        .into_iter()
        .map(|(source_file, samples)| project_onto_grid(source_file, samples, &grid))
        .collect();

    WideTable { grid, sources }
}

fn project_onto_grid(
    source_file: &str,
    mut samples: Vec<RoundedSample>,
    grid: &[f64],
) -> SourceColumns {
    // Stable sort: identical raw times keep file order.
    samples.sort_by(|a, b| {
        a.time_round
            .total_cmp(&b.time_round)
            .then(a.time.total_cmp(&b.time))
    });
    samples.dedup_by(|later, kept| later.time_round == kept.time_round);

    let mut time = vec![None; grid.len()];
    let mut intensity = vec![None; grid.len()];
    for sample in samples {
        // Every rounded time was pushed into the grid, so the search always hits.
        if let Ok(row) = grid.binary_search_by(|point| point.total_cmp(&sample.time_round)) {
            time[row] = Some(sample.time);
            intensity[row] = Some(sample.intensity);
        }
    }

    SourceColumns {
        source_file: source_file.to_string(),
        time,
        intensity,
    }
}
