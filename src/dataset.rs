//! # Record Aggregation
//!
//! Collects the records of every parsed file into one [`Dataset`] and splits
//! it into [`ChannelPartition`]s, one per (function, channel_id) pair.
//!
//! The dataset is append-only while files are being parsed
//! ([`DatasetBuilder`]) and read-only afterwards.

use std::collections::{BTreeMap, BTreeSet};

use crate::align::{build_wide_table, Sample, WideTable};
use crate::record::{ChannelKey, MeasurementRecord};

/// Accumulates records file by file.
#[derive(Debug, Default)]
pub struct DatasetBuilder {
    records: Vec<MeasurementRecord>,
    files: usize,
}

impl DatasetBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the records of one file.
    pub fn add_file(&mut self, records: Vec<MeasurementRecord>) {
        if !records.is_empty() {
            self.files += 1;
        }
        self.records.extend(records);
    }

    /// Freeze the collected records.
    pub fn build(self) -> Dataset {
        Dataset {
            records: self.records,
            files_with_data: self.files,
        }
    }
}

/// All records of one run, in file order then line order.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<MeasurementRecord>,
    files_with_data: usize,
}

impl Dataset {
    /// All records.
    pub fn records(&self) -> &[MeasurementRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no file produced any record.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of files that contributed at least one record.
    pub fn files_with_data(&self) -> usize {
        self.files_with_data
    }

    /// Group records by (function, channel_id), ascending function then channel_id.
    pub fn partitions(&self) -> Vec<ChannelPartition<'_>> {
        let mut groups: BTreeMap<ChannelKey, Vec<&MeasurementRecord>> = BTreeMap::new();
        for record in &self.records {
            groups.entry(record.channel_key()).or_default().push(record);
        }

        groups
            .into_iter()
            .map(|(key, records)| ChannelPartition { key, records })
            .collect()
    }
}

impl FromIterator<MeasurementRecord> for Dataset {
    fn from_iter<T: IntoIterator<Item = MeasurementRecord>>(iter: T) -> Self {
        let records: Vec<MeasurementRecord> = iter.into_iter().collect();
        let files_with_data = records
            .iter()
            .map(|r| &*r.source_file)
            .collect::<BTreeSet<_>>()
            .len();
        Self {
            records,
            files_with_data,
        }
    }
}

/// The records of one output sheet.
#[derive(Debug, Clone)]
pub struct ChannelPartition<'a> {
    key: ChannelKey,
    records: Vec<&'a MeasurementRecord>,
}

impl<'a> ChannelPartition<'a> {
    /// The (function, channel_id) pair shared by every record.
    pub fn key(&self) -> &ChannelKey {
        &self.key
    }

    /// Records in dataset order.
    pub fn records(&self) -> &[&'a MeasurementRecord] {
        &self.records
    }

    /// Number of distinct source files (the chromatogram count).
    pub fn source_file_count(&self) -> usize {
        self.records
            .iter()
            .map(|r| &*r.source_file)
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Align this partition onto its rounded time grid.
    pub fn to_wide_table(&self, time_decimals: u32) -> WideTable {
        build_wide_table(self.records.iter().map(|&r| Sample::from(r)), time_decimals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_records;
    use crate::record::SourceInfo;

    fn parse(name: &str, text: &str) -> Vec<MeasurementRecord> {
        parse_records(text, &SourceInfo::named(name))
    }

    #[test]
    fn test_partitions_are_sorted() {
        let mut builder = DatasetBuilder::new();
        builder.add_file(parse(
            "A.txt",
            "FUNCTION 2\nRetention Time 0.1\n254 1\n1000 2\n220 3\n\
             FUNCTION 1\nRetention Time 0.1\n500.5 9",
        ));
        let dataset = builder.build();

        let keys: Vec<ChannelKey> = dataset.partitions().iter().map(|p| p.key().clone()).collect();
        assert_eq!(
            keys,
            vec![
                ChannelKey::new(1, "MS"),
                ChannelKey::new(2, "1000.0000"),
                ChannelKey::new(2, "220.0000"),
                ChannelKey::new(2, "254.0000"),
            ]
        );
    }

    #[test]
    fn test_partition_spans_files() {
        let mut builder = DatasetBuilder::new();
        builder.add_file(parse(
            "A.txt",
            "FUNCTION 2\nRetention Time 0.1\n254 1\nRetention Time 0.2\n254 2",
        ));
        builder.add_file(Vec::new());
        builder.add_file(parse("B.txt", "FUNCTION 2\nRetention Time 0.15\n254 5"));
        let dataset = builder.build();
        assert_eq!(dataset.len(), 3);

        assert_eq!(dataset.files_with_data(), 2);
        let partitions = dataset.partitions();
        assert_eq!(partitions.len(), 1);
        assert_eq!(partitions[0].records().len(), 3);
        assert_eq!(partitions[0].source_file_count(), 2);

        let table = partitions[0].to_wide_table(3);
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.column_count(), 4);
    }

    #[test]
    fn test_same_base_name_shares_columns() {
        let a = parse_records(
            "FUNCTION 2\nRetention Time 0.1\n254 1",
            &SourceInfo::from_path(std::path::Path::new("day1/run.txt")),
        );
        let b = parse_records(
            "FUNCTION 2\nRetention Time 0.2\n254 2",
            &SourceInfo::from_path(std::path::Path::new("day2/run.txt")),
        );
        let dataset: Dataset = a.into_iter().chain(b).collect();

        let partitions = dataset.partitions();
        assert_eq!(partitions[0].source_file_count(), 1);
        assert_eq!(partitions[0].to_wide_table(3).column_count(), 2);
    }

    #[test]
    fn test_empty_dataset() {
        let dataset = DatasetBuilder::new().build();
        assert!(dataset.is_empty());
        assert!(dataset.partitions().is_empty());
    }
}
