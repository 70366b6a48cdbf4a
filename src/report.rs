//! Per-file scan report.
//!
//! One line per input file: how many records it produced, or why it produced
//! none. Empty and unreadable files never stop a run.

use std::fmt;
use std::path::PathBuf;

#[cfg(feature = "colorized_output")]
use console::style;

/// What scanning one file produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// File produced records
    Parsed {
        /// Number of records
        records: usize,
        /// Invalid UTF-8 bytes dropped while decoding
        dropped_bytes: usize,
    },
    /// File was read but contained no recognizable traces
    Empty,
    /// File could not be read
    Unreadable(String),
}

impl FileOutcome {
    fn records(&self) -> usize {
        match self {
            FileOutcome::Parsed { records, .. } => *records,
            _ => 0,
        }
    }
}

/// Scan result of one input file
#[derive(Debug, Clone)]
pub struct FileScan {
    /// Base name shown in the report
    pub file_name: String,
    /// Full path
    pub path: PathBuf,
    /// Outcome
    pub outcome: FileOutcome,
}

/// Scan results of every input file, in discovery order
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    /// Individual file results
    pub files: Vec<FileScan>,
}

impl ScanReport {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of one file
    pub fn add(&mut self, path: PathBuf, outcome: FileOutcome) {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        self.files.push(FileScan {
            file_name,
            path,
            outcome,
        });
    }

    /// Number of files scanned
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Number of files that produced records
    pub fn files_with_data(&self) -> usize {
        self.files
            .iter()
            .filter(|f| matches!(f.outcome, FileOutcome::Parsed { .. }))
            .count()
    }

    /// Number of files without recognizable traces
    pub fn empty_count(&self) -> usize {
        self.files
            .iter()
            .filter(|f| f.outcome == FileOutcome::Empty)
            .count()
    }

    /// Number of files that could not be read
    pub fn unreadable_count(&self) -> usize {
        self.files
            .iter()
            .filter(|f| matches!(f.outcome, FileOutcome::Unreadable(_)))
            .count()
    }

    /// Records over all files
    pub fn total_records(&self) -> usize {
        self.files.iter().map(|f| f.outcome.records()).sum()
    }

    /// Format the report with colors (requires console feature)
    pub fn format_colored(&self) -> String {
        #[cfg(feature = "colorized_output")]
        {
            use console::Emoji;

            static OK: Emoji<'_, '_> = Emoji("✓", "[OK]");
            static WARN: Emoji<'_, '_> = Emoji("⚠", "[WARN]");
            static FAIL: Emoji<'_, '_> = Emoji("✗", "[FAIL]");

            let mut output = String::new();
            for file in &self.files {
                let line = match &file.outcome {
                    FileOutcome::Parsed { records, .. } => format!(
                        "  {} {}: {} row(s)",
                        style(OK).green(),
                        file.file_name,
                        records
                    ),
                    FileOutcome::Empty => format!(
                        "  {} {}: {}",
                        style(WARN).yellow(),
                        file.file_name,
                        style("no recognizable traces found").yellow()
                    ),
                    FileOutcome::Unreadable(reason) => format!(
                        "  {} {}: {}",
                        style(FAIL).red(),
                        file.file_name,
                        style(format!("unreadable ({reason})")).red()
                    ),
                };
                output.push_str(&line);
                output.push('\n');
            }
            output
        }

        #[cfg(not(feature = "colorized_output"))]
        {
            format!("{}", self)
        }
    }
}

impl fmt::Display for ScanReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for file in &self.files {
            match &file.outcome {
                FileOutcome::Parsed { records, .. } => {
                    writeln!(f, "  ✓ {}: {} row(s)", file.file_name, records)?
                }
                FileOutcome::Empty => {
                    writeln!(f, "  ⚠ {}: no recognizable traces found", file.file_name)?
                }
                FileOutcome::Unreadable(reason) => {
                    writeln!(f, "  ✗ {}: unreadable ({})", file.file_name, reason)?
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_counts_and_display() {
        let mut report = ScanReport::new();
        report.add(
            PathBuf::from("/d/A.txt"),
            FileOutcome::Parsed {
                records: 12,
                dropped_bytes: 0,
            },
        );
        report.add(PathBuf::from("/d/B.txt"), FileOutcome::Empty);
        report.add(
            PathBuf::from("/d/C.txt"),
            FileOutcome::Unreadable("permission denied".to_string()),
        );

        assert_eq!(report.file_count(), 3);
        assert_eq!(report.files_with_data(), 1);
        assert_eq!(report.empty_count(), 1);
        assert_eq!(report.unreadable_count(), 1);
        assert_eq!(report.total_records(), 12);

        let text = report.to_string();
        assert!(text.contains("✓ A.txt: 12 row(s)"));
        assert!(text.contains("⚠ B.txt: no recognizable traces found"));
        assert!(text.contains("✗ C.txt: unreadable (permission denied)"));
    }
}
