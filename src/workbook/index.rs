use std::cmp::Ordering;

/// Column headers of the `INDEX` sheet, in order.
pub const INDEX_COLUMNS: [&str; 6] = [
    "sheet_name",
    "function",
    "channel_id",
    "channel_label",
    "chromatograms",
    "rows_in_sheet",
];

/// One row of the `INDEX` sheet, describing one data sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetIndexEntry {
    /// Worksheet name
    pub sheet_name: String,
    /// Function number
    pub function: i64,
    /// Channel identity
    pub channel_id: String,
    /// Display label
    pub channel_label: String,
    /// Distinct source files in the sheet
    pub chromatograms: usize,
    /// Data rows in the sheet
    pub rows_in_sheet: usize,
}

impl SheetIndexEntry {
    fn index_order(&self, other: &Self) -> Ordering {
        self.function
            .cmp(&other.function)
            .then_with(|| self.channel_label.cmp(&other.channel_label))
            .then_with(|| self.sheet_name.cmp(&other.sheet_name))
    }
}

/// Sort entries by function, then label, then sheet name.
pub fn sort_index(entries: &mut [SheetIndexEntry]) {
    entries.sort_by(SheetIndexEntry::index_order);
}
