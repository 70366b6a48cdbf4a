use std::io::Write;
use std::path::{Path, PathBuf};

use log::debug;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use tempfile::NamedTempFile;

use super::assembler::AssembledWorkbook;
use super::index::{SheetIndexEntry, INDEX_COLUMNS};
use crate::align::WideTable;
use crate::error::ConvertError;
use crate::naming::INDEX_SHEET_NAME;

/// Maximum rows of an Excel worksheet, header included.
pub const EXCEL_MAX_ROWS: usize = 1_048_576;

/// Maximum columns of an Excel worksheet.
pub const EXCEL_MAX_COLUMNS: usize = 16_384;

/// Destination of an assembled workbook.
///
/// A sink receives the complete workbook in one call, after every table has
/// been built, so a failure during assembly never leaves partial output.
pub trait TableSink {
    /// Serialize every data sheet followed by the `INDEX` sheet.
    fn write_workbook(&mut self, workbook: &AssembledWorkbook) -> Result<(), ConvertError>;

    /// File the workbook is written to, if any.
    fn destination(&self) -> Option<&Path> {
        None
    }
}

/// Writes `.xlsx` files.
///
/// The workbook is saved to a temporary file next to the destination and then
/// renamed over it, so readers never observe a half-written file.
#[derive(Debug, Clone)]
pub struct XlsxSink {
    path: PathBuf,
}

impl XlsxSink {
    /// Create a sink writing to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Destination path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn build(&self, assembled: &AssembledWorkbook) -> Result<Workbook, ConvertError> {
        let mut workbook = Workbook::new();
        let header = Format::new().set_bold();

        for sheet in &assembled.sheets {
            check_sheet_size(&sheet.name, sheet.table.row_count(), sheet.table.column_count())?;
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(&sheet.name)?;
            write_wide_table(worksheet, &sheet.table, &header)?;
        }

        let worksheet = workbook.add_worksheet();
        worksheet.set_name(INDEX_SHEET_NAME)?;
        write_index(worksheet, &assembled.index, &header)?;

        Ok(workbook)
    }
}

impl TableSink for XlsxSink {
    fn write_workbook(&mut self, assembled: &AssembledWorkbook) -> Result<(), ConvertError> {
        let mut workbook = self.build(assembled)?;
        let buffer = workbook.save_to_buffer()?;

        let parent = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let mut staged = NamedTempFile::new_in(parent)?;
        staged.write_all(&buffer)?;
        staged.flush()?;
        staged.persist(&self.path).map_err(|e| e.error)?;

        debug!(
            "Saved {} sheet(s), {} bytes to {}",
            assembled.sheets.len() + 1,
            buffer.len(),
            self.path.display()
        );
        Ok(())
    }

    fn destination(&self) -> Option<&Path> {
        Some(&self.path)
    }
}

/// Keeps the last assembled workbook in memory instead of writing it.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    /// Last workbook received
    pub workbook: Option<AssembledWorkbook>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }
}

impl TableSink for MemorySink {
    fn write_workbook(&mut self, workbook: &AssembledWorkbook) -> Result<(), ConvertError> {
        self.workbook = Some(workbook.clone());
        Ok(())
    }
}

pub(crate) fn check_sheet_size(
    name: &str,
    rows: usize,
    columns: usize,
) -> Result<(), ConvertError> {
    if rows + 1 > EXCEL_MAX_ROWS || columns > EXCEL_MAX_COLUMNS {
        return Err(ConvertError::SheetTooLarge {
            sheet: name.to_string(),
            rows,
            columns,
        });
    }
    Ok(())
}

fn write_wide_table(
    worksheet: &mut Worksheet,
    table: &WideTable,
    header: &Format,
) -> Result<(), ConvertError> {
    for (col, name) in table.column_names().iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, name.as_str(), header)?;
    }

    // Row 0 is the header; gaps stay blank
    for (row, cells) in table.rows().enumerate() {
        let row = (row + 1) as u32;
        for (col, cell) in cells.into_iter().enumerate() {
            if let Some(value) = cell {
                worksheet.write_number(row, col as u16, value)?;
            }
        }
    }

    if table.row_count() > 0 {
        worksheet.set_freeze_panes(1, 0)?;
    }
    Ok(())
}

fn write_index(
    worksheet: &mut Worksheet,
    entries: &[SheetIndexEntry],
    header: &Format,
) -> Result<(), ConvertError> {
    for (col, name) in INDEX_COLUMNS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *name, header)?;
    }

    for (row, entry) in entries.iter().enumerate() {
        let row = (row + 1) as u32;
        worksheet.write_string(row, 0, entry.sheet_name.as_str())?;
        worksheet.write_number(row, 1, entry.function as f64)?;
        worksheet.write_string(row, 2, entry.channel_id.as_str())?;
        worksheet.write_string(row, 3, entry.channel_label.as_str())?;
        worksheet.write_number(row, 4, entry.chromatograms as f64)?;
        worksheet.write_number(row, 5, entry.rows_in_sheet as f64)?;
    }
    Ok(())
}
