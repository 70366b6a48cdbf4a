//! # Measurement Records
//!
//! The flat, typed form of one numeric line from a MassLynx ASCII export.
//!
//! Every data-pair line that survives parsing becomes one [`MeasurementRecord`].
//! How the pair is read depends only on the function block it appears in:
//!
//! | Function | First value | Second value | `channel_id` |
//! |----------|-------------|--------------|--------------|
//! | 1 (MS)   | m/z         | intensity    | `"MS"`       |
//! | other    | channel     | intensity    | channel formatted with 4 decimals |

use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Function number reserved for mass-spectrometry scans.
pub const MS_FUNCTION: i64 = 1;

/// Channel identity used for every record of the MS function.
pub const MS_CHANNEL_ID: &str = "MS";

/// Decimal places used when turning a channel value into its identity string.
///
/// Two channel values that agree to four decimals are the same channel.
pub const CHANNEL_ID_DECIMALS: usize = 4;

/// Provenance of a parsed file, shared by all records read from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceInfo {
    /// Base name of the file (grouping and column-naming key)
    pub file_name: Arc<str>,
    /// Full path, kept for traceability only
    pub path: Arc<str>,
}

impl SourceInfo {
    /// Build provenance from a file path.
    pub fn from_path(path: &Path) -> Self {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());

        Self {
            file_name: Arc::from(file_name),
            path: Arc::from(path.to_string_lossy().into_owned()),
        }
    }

    /// Build provenance from a bare name (in-memory inputs and tests).
    pub fn named(name: &str) -> Self {
        Self {
            file_name: Arc::from(name),
            path: Arc::from(name),
        }
    }
}

/// One numeric observation read from a data-pair line.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementRecord {
    /// Function block the pair was read in
    pub function: i64,
    /// Most recent scan number of the current function block
    pub scan: Option<i64>,
    /// Most recent retention time of the current function block
    pub time: f64,
    /// m/z value (MS function only)
    pub mz: Option<f64>,
    /// Signal intensity (second value of the pair)
    pub intensity: f64,
    /// Channel identity: `"MS"` or the 4-decimal channel value
    pub channel_id: String,
    /// Display label, equal to `channel_id` at parse time
    pub channel_label: String,
    /// Base name of the originating file
    pub source_file: Arc<str>,
    /// Full path of the originating file
    pub source_path: Arc<str>,
}

impl MeasurementRecord {
    /// Interpret a numeric pair read inside `function` at retention time `time`.
    pub fn from_pair(
        function: i64,
        scan: Option<i64>,
        time: f64,
        first: f64,
        second: f64,
        source: &SourceInfo,
    ) -> Self {
        let (mz, channel_id) = if function == MS_FUNCTION {
            (Some(first), MS_CHANNEL_ID.to_string())
        } else {
            (None, format_channel_id(first))
        };

        Self {
            function,
            scan,
            time,
            mz,
            intensity: second,
            channel_label: channel_id.clone(),
            channel_id,
            source_file: Arc::clone(&source.file_name),
            source_path: Arc::clone(&source.path),
        }
    }

    /// The partition key this record belongs to.
    pub fn channel_key(&self) -> ChannelKey {
        ChannelKey::new(self.function, self.channel_id.clone())
    }
}

/// Format a raw channel value as its identity string (e.g. `220` → `"220.0000"`).
pub fn format_channel_id(value: f64) -> String {
    format!("{:.*}", CHANNEL_ID_DECIMALS, value)
}

/// Identity of one output sheet: a (function, channel_id) pair.
///
/// Ordering is function first, then channel_id as a plain string, which is the
/// order sheets are emitted in.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChannelKey {
    /// Function number
    pub function: i64,
    /// Channel identity string
    pub channel_id: String,
}

impl ChannelKey {
    /// Create a new key.
    pub fn new(function: i64, channel_id: impl Into<String>) -> Self {
        Self {
            function,
            channel_id: channel_id.into(),
        }
    }
}

impl fmt::Display for ChannelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "F{}/{}", self.function, self.channel_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ms_pair_interpretation() {
        let source = SourceInfo::named("A.txt");
        let record = MeasurementRecord::from_pair(1, Some(3), 1.234, 100.0, 50.0, &source);

        assert_eq!(record.mz, Some(100.0));
        assert_eq!(record.channel_id, "MS");
        assert_eq!(record.channel_label, "MS");
        assert_eq!(record.intensity, 50.0);
        assert_eq!(record.scan, Some(3));
        assert_eq!(record.function, MS_FUNCTION);
    }

    #[test]
    fn test_channel_pair_interpretation() {
        let source = SourceInfo::named("A.txt");
        let record = MeasurementRecord::from_pair(2, None, 1.234, 220.0, 75.0, &source);

        assert_eq!(record.mz, None);
        assert_eq!(record.channel_id, "220.0000");
        assert_eq!(record.channel_label, record.channel_id);
        assert_eq!(&*record.source_file, "A.txt");
    }

    #[test]
    fn test_channel_id_merges_beyond_fourth_decimal() {
        assert_eq!(format_channel_id(254.00001), format_channel_id(254.00004));
        assert_eq!(format_channel_id(-1.5), "-1.5000");
    }

    #[test]
    fn test_source_info_uses_base_name() {
        let source = SourceInfo::from_path(Path::new("/data/run1/sample.txt"));
        assert_eq!(&*source.file_name, "sample.txt");
        assert_eq!(&*source.path, "/data/run1/sample.txt");
    }

    #[test]
    fn test_channel_key_ordering() {
        let mut keys = vec![
            ChannelKey::new(2, "254.0000"),
            ChannelKey::new(1, "MS"),
            ChannelKey::new(2, "1000.0000"),
        ];
        keys.sort();
        assert_eq!(keys[0], ChannelKey::new(1, "MS"));
        // String order, not numeric
        assert_eq!(keys[1], ChannelKey::new(2, "1000.0000"));
        assert_eq!(keys[2], ChannelKey::new(2, "254.0000"));
    }
}
