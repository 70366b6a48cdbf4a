use std::path::{Path, PathBuf};

use log::{info, warn};

use super::config::ConversionConfig;
use super::index::{sort_index, SheetIndexEntry};
use super::sink::TableSink;
use super::stats::RunSummary;
use crate::align::WideTable;
use crate::dataset::{ChannelPartition, Dataset, DatasetBuilder};
use crate::discovery::discover_input_files;
use crate::error::ConvertError;
use crate::naming::{channel_label, sheet_base_name, SheetNamer};
use crate::parser::parse_file;
use crate::record::ChannelKey;
use crate::report::{FileOutcome, ScanReport};

/// One data sheet of the output workbook
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelSheet {
    /// Unique worksheet name
    pub name: String,
    /// Partition the sheet was built from
    pub key: ChannelKey,
    /// Display label
    pub label: String,
    /// Aligned time/intensity columns
    pub table: WideTable,
}

/// Every table of a run, built in memory before anything is written
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssembledWorkbook {
    /// Data sheets in partition order
    pub sheets: Vec<ChannelSheet>,
    /// Rows of the `INDEX` sheet, sorted
    pub index: Vec<SheetIndexEntry>,
}

impl AssembledWorkbook {
    /// Look up a data sheet by name.
    pub fn sheet(&self, name: &str) -> Option<&ChannelSheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    /// Data sheet names in workbook order.
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }
}

/// Result of discovering and parsing the input files
#[derive(Debug)]
pub struct ScanResult {
    /// Input root
    pub root: PathBuf,
    /// Discovered files, sorted
    pub files: Vec<PathBuf>,
    /// Records of all files
    pub dataset: Dataset,
    /// Per-file outcome
    pub report: ScanReport,
}

/// Drives a conversion: discover, parse, group, align, name, write.
#[derive(Debug, Clone, Default)]
pub struct WorkbookAssembler {
    config: ConversionConfig,
}

impl WorkbookAssembler {
    /// Create an assembler with the given settings.
    pub fn new(config: ConversionConfig) -> Self {
        Self { config }
    }

    /// Settings of this assembler.
    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    /// List the input files under `root`.
    ///
    /// Fails with [`ConvertError::InvalidRoot`] when `root` is not a directory and
    /// with [`ConvertError::NoInputFiles`] when nothing matches.
    pub fn discover(&self, root: &Path) -> Result<Vec<PathBuf>, ConvertError> {
        if !root.is_dir() {
            return Err(ConvertError::InvalidRoot(root.to_path_buf()));
        }

        let files = discover_input_files(root, self.config.recursive, &self.config.extension)?;
        if files.is_empty() {
            return Err(ConvertError::NoInputFiles {
                root: root.to_path_buf(),
                recursive: self.config.recursive,
                extension: self.config.extension.clone(),
            });
        }
        Ok(files)
    }

    /// Parse every file, one after another. Unreadable or empty files are reported, not fatal.
    pub fn parse_files(&self, files: &[PathBuf]) -> (Dataset, ScanReport) {
        let mut builder = DatasetBuilder::new();
        let mut report = ScanReport::new();

        for path in files {
            match parse_file(path) {
                Ok(parsed) if parsed.is_empty() => {
                    warn!("{}: no recognizable traces found", path.display());
                    report.add(path.clone(), FileOutcome::Empty);
                }
                Ok(parsed) => {
                    info!("{}: {} row(s)", path.display(), parsed.records.len());
                    report.add(
                        path.clone(),
                        FileOutcome::Parsed {
                            records: parsed.records.len(),
                            dropped_bytes: parsed.dropped_bytes,
                        },
                    );
                    builder.add_file(parsed.records);
                }
                Err(e) => {
                    warn!("{}: could not be read: {}", path.display(), e);
                    report.add(path.clone(), FileOutcome::Unreadable(e.to_string()));
                }
            }
        }

        info!(
            "Parsed {} record(s); {} empty, {} unreadable",
            report.total_records(),
            report.empty_count(),
            report.unreadable_count()
        );
        (builder.build(), report)
    }

    /// Discover and parse the inputs under `root`.
    pub fn scan(&self, root: &Path) -> Result<ScanResult, ConvertError> {
        self.scan_with(root, |files| info!("Found {} file(s). Parsing...", files.len()))
    }

    /// Like [`scan`](Self::scan), calling `on_discovered` with the file list
    /// before parsing starts.
    pub fn scan_with<F>(&self, root: &Path, on_discovered: F) -> Result<ScanResult, ConvertError>
    where
        F: FnOnce(&[PathBuf]),
    {
        self.config.validate()?;
        let files = self.discover(root)?;
        on_discovered(&files);

        let (dataset, report) = self.parse_files(&files);
        Ok(ScanResult {
            root: root.to_path_buf(),
            files,
            dataset,
            report,
        })
    }

    /// Build one sheet per partition plus the index rows.
    pub fn assemble(&self, dataset: &Dataset) -> AssembledWorkbook {
        let mut namer = SheetNamer::with_index_reserved();
        let mut sheets = Vec::new();
        let mut index = Vec::new();

        for partition in dataset.partitions() {
            let sheet = self.build_sheet(&partition, &mut namer);
            index.push(SheetIndexEntry {
                sheet_name: sheet.name.clone(),
                function: sheet.key.function,
                channel_id: sheet.key.channel_id.clone(),
                channel_label: sheet.label.clone(),
                chromatograms: partition.source_file_count(),
                rows_in_sheet: sheet.table.row_count(),
            });
            sheets.push(sheet);
        }

        sort_index(&mut index);
        AssembledWorkbook { sheets, index }
    }

    fn build_sheet(
        &self,
        partition: &ChannelPartition<'_>,
        namer: &mut SheetNamer,
    ) -> ChannelSheet {
        let key = partition.key().clone();
        let label = channel_label(&key);
        let name = namer.assign(&sheet_base_name(&self.config.sheet_prefix, &key, &label));
        let table = partition.to_wide_table(self.config.time_decimals);

        info!(
            "Sheet {}: {} file(s), {} row(s)",
            name,
            partition.source_file_count(),
            table.row_count()
        );
        ChannelSheet {
            name,
            key,
            label,
            table,
        }
    }

    /// Assemble the scanned data and hand it to `sink`.
    ///
    /// Fails with [`ConvertError::NoData`] when no file produced a record; the
    /// sink is not touched in that case.
    pub fn write<S: TableSink>(
        &self,
        scan: ScanResult,
        sink: &mut S,
    ) -> Result<RunSummary, ConvertError> {
        if scan.dataset.is_empty() {
            return Err(ConvertError::NoData {
                files: scan.report.file_count(),
            });
        }

        let workbook = self.assemble(&scan.dataset);
        sink.write_workbook(&workbook)?;

        Ok(RunSummary {
            files_found: scan.files.len(),
            files_with_data: scan.dataset.files_with_data(),
            records: scan.dataset.len(),
            sheets: workbook.sheets.len(),
            output: sink.destination().map(Path::to_path_buf),
            report: scan.report,
        })
    }

    /// Run the whole pipeline on `root`, writing to `sink`.
    pub fn run<S: TableSink>(
        &self,
        root: &Path,
        sink: &mut S,
    ) -> Result<RunSummary, ConvertError> {
        let scan = self.scan(root)?;
        self.write(scan, sink)
    }
}
