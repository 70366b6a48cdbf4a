use std::fmt;
use std::path::PathBuf;

use crate::report::ScanReport;

/// Statistics from a completed conversion run
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Input files discovered
    pub files_found: usize,
    /// Files that produced at least one record
    pub files_with_data: usize,
    /// Records parsed over all files
    pub records: usize,
    /// Data sheets written (excluding `INDEX`)
    pub sheets: usize,
    /// Workbook location, when the sink writes to disk
    pub output: Option<PathBuf>,
    /// Per-file scan results
    pub report: ScanReport,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Parsed {} record(s) from {} of {} file(s) into {} channel sheet(s)",
            self.records, self.files_with_data, self.files_found, self.sheets
        )?;
        let unreadable = self.report.unreadable_count();
        if unreadable > 0 {
            write!(f, " ({} unreadable)", unreadable)?;
        }
        if let Some(output) = &self.output {
            write!(f, "; wrote {}", output.display())?;
        }
        Ok(())
    }
}
