//! # Channel Labels and Sheet Names
//!
//! Human-readable labels for channel partitions, and worksheet names that
//! satisfy Excel's rules:
//!
//! - at most [`MAX_SHEET_NAME_LEN`] characters
//! - none of [`FORBIDDEN_SHEET_CHARS`]
//! - no leading or trailing apostrophe
//! - unique within the workbook, compared case-insensitively
//!
//! Labels: the MS function is always `MS`; other channels become `ch-<n>`,
//! with integral channel values shown without decimals (`220.0000` → `ch-220`).

use std::collections::HashSet;

use crate::record::{ChannelKey, MS_CHANNEL_ID, MS_FUNCTION};

/// Maximum worksheet name length, in characters.
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// Characters Excel rejects in worksheet names.
pub const FORBIDDEN_SHEET_CHARS: [char; 7] = [':', '/', '\\', '?', '*', '[', ']'];

/// Replacement for forbidden characters.
pub const SHEET_NAME_REPLACEMENT: char = '_';

/// Name of the summary sheet.
pub const INDEX_SHEET_NAME: &str = "INDEX";

/// Channel values this close to an integer are displayed as that integer.
pub const INTEGER_TOLERANCE: f64 = 1e-6;

/// Significant digits of the compact numeric format.
const GENERAL_PRECISION: usize = 6;

/// Display label for a partition: `MS` or `ch-<channel>`.
pub fn channel_label(key: &ChannelKey) -> String {
    if key.function == MS_FUNCTION {
        return MS_CHANNEL_ID.to_string();
    }

    let display = key
        .channel_id
        .trim()
        .parse::<f64>()
        .ok()
        .and_then(format_channel_number)
        .unwrap_or_else(|| key.channel_id.clone());

    format!("ch-{display}")
}

/// Display form of a channel value, `None` for non-finite values.
pub fn format_channel_number(value: f64) -> Option<String> {
    if !value.is_finite() {
        return None;
    }

    let nearest = value.round();
    if (value - nearest).abs() < INTEGER_TOLERANCE {
        // `-0.0` would print as "-0"
        if nearest == 0.0 {
            return Some("0".to_string());
        }
        return Some(format!("{nearest:.0}"));
    }

    Some(format_general(value))
}

/// Compact numeric format with six significant digits (printf `%g`).
///
/// Fixed notation for exponents in `-4..6`, scientific otherwise, trailing
/// zeros removed: `254.5`, `0.0001`, `1.23457e+06`, `1e-05`.
pub fn format_general(value: f64) -> String {
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let scientific = format!("{:.*e}", GENERAL_PRECISION - 1, value);
    let Some((mantissa, exponent)) = scientific
        .split_once('e')
        .and_then(|(m, e)| Some((m, e.parse::<i32>().ok()?)))
    else {
        return value.to_string();
    };

    if exponent < -4 || exponent >= GENERAL_PRECISION as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            trim_fraction(mantissa),
            sign,
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (GENERAL_PRECISION as i32 - 1 - exponent) as usize;
        trim_fraction(&format!("{value:.decimals$}")).to_string()
    }
}

fn trim_fraction(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}

/// Unsanitized sheet name: `<prefix>F<function>_<label>`.
pub fn sheet_base_name(prefix: &str, key: &ChannelKey, label: &str) -> String {
    format!("{prefix}F{}_{label}", key.function)
}

/// Replace forbidden characters, and apostrophes at either end.
pub fn sanitize_sheet_name(name: &str) -> String {
    let mut sanitized: String = name
        .chars()
        .map(|c| {
            if FORBIDDEN_SHEET_CHARS.contains(&c) {
                SHEET_NAME_REPLACEMENT
            } else {
                c
            }
        })
        .collect();
    fix_edge_apostrophes(&mut sanitized);
    sanitized
}

fn fix_edge_apostrophes(name: &mut String) {
    if name.starts_with('\'') {
        name.replace_range(..1, "_");
    }
    if name.ends_with('\'') {
        let last = name.len() - 1;
        name.replace_range(last.., "_");
    }
}

fn truncate_chars(name: &str, max_chars: usize) -> &str {
    match name.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &name[..byte_index],
        None => name,
    }
}

fn fold_case(name: &str) -> String {
    name.to_lowercase()
}

/// Pick a unique sheet name for `candidate`.
///
/// `used` holds case-folded (lowercase) names already taken. On collision a
/// `_1`, `_2`, ... suffix is appended and the base shortened so the result
/// stays within [`MAX_SHEET_NAME_LEN`] characters.
pub fn unique_sheet_name(candidate: &str, used: &HashSet<String>) -> String {
    let sanitized = sanitize_sheet_name(candidate);
    let mut base = truncate_chars(&sanitized, MAX_SHEET_NAME_LEN).to_string();
    fix_edge_apostrophes(&mut base);

    let mut name = base.clone();
    let mut counter = 1usize;
    while used.contains(&fold_case(&name)) {
        let suffix = format!("_{counter}");
        let room = MAX_SHEET_NAME_LEN - suffix.chars().count();
        name = format!("{}{}", truncate_chars(&base, room), suffix);
        counter += 1;
    }

    name
}

/// Hands out unique sheet names for one workbook.
///
/// Owned by a single assembly pass; names are never released.
#[derive(Debug, Clone, Default)]
pub struct SheetNamer {
    used: HashSet<String>,
}

impl SheetNamer {
    /// Create a namer with no names taken.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a namer with the `INDEX` sheet name already taken.
    pub fn with_index_reserved() -> Self {
        let mut namer = Self::new();
        namer.reserve(INDEX_SHEET_NAME);
        namer
    }

    /// Mark a name as taken. Returns `false` if it already was.
    pub fn reserve(&mut self, name: &str) -> bool {
        self.used.insert(fold_case(name))
    }

    /// Whether a name is taken (case-insensitive).
    pub fn is_used(&self, name: &str) -> bool {
        self.used.contains(&fold_case(name))
    }

    /// Number of names taken.
    pub fn len(&self) -> usize {
        self.used.len()
    }

    /// Whether no name is taken.
    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }

    /// Derive a unique name for `candidate` and record it as taken.
    pub fn assign(&mut self, candidate: &str) -> String {
        let name = unique_sheet_name(candidate, &self.used);
        self.reserve(&name);
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn channel(id: &str) -> ChannelKey {
        ChannelKey::new(2, id)
    }

    #[test]
    fn test_ms_label() {
        assert_eq!(channel_label(&ChannelKey::new(1, "MS")), "MS");
    }

    #[test]
    fn test_integral_channel_label() {
        assert_eq!(channel_label(&channel("220.0000")), "ch-220");
        assert_eq!(channel_label(&channel("-0.0000")), "ch-0");
        assert_eq!(channel_label(&channel("1000000000.0000")), "ch-1000000000");
    }

    #[test]
    fn test_fractional_channel_label() {
        assert_eq!(channel_label(&channel("254.5000")), "ch-254.5");
        assert_eq!(channel_label(&channel("0.0001")), "ch-0.0001");
        assert_eq!(channel_label(&channel("1234567.5000")), "ch-1.23457e+06");
    }

    #[test]
    fn test_unparseable_channel_falls_back() {
        assert_eq!(channel_label(&channel("TIC")), "ch-TIC");
    }

    #[test]
    fn test_format_general() {
        assert_eq!(format_general(254.5), "254.5");
        assert_eq!(format_general(0.00001), "1e-05");
        assert_eq!(format_general(123456.7), "123457");
        assert_eq!(format_general(-2.25), "-2.25");
        assert_eq!(format_general(1e20), "1e+20");
    }

    #[test]
    fn test_sheet_base_name() {
        let key = channel("220.0000");
        assert_eq!(sheet_base_name("", &key, "ch-220"), "F2_ch-220");
        assert_eq!(sheet_base_name("Day1_", &key, "ch-220"), "Day1_F2_ch-220");
    }

    #[test]
    fn test_sanitize_forbidden_chars() {
        assert_eq!(sanitize_sheet_name("a:b/c\\d?e*f[g]h"), "a_b_c_d_e_f_g_h");
        assert_eq!(sanitize_sheet_name("'quoted'"), "_quoted_");
        assert_eq!(sanitize_sheet_name("it's"), "it's");
    }

    #[test]
    fn test_truncation_and_collision() {
        let mut namer = SheetNamer::new();
        let long = "VeryLongExperimentPrefix_2024_F2_ch-254";
        let first = namer.assign(long);
        let second = namer.assign(long);
        let third = namer.assign(long);

        assert_eq!(first, "VeryLongExperimentPrefix_2024_F");
        assert_eq!(second, "VeryLongExperimentPrefix_2024_1");
        assert_eq!(third, "VeryLongExperimentPrefix_2024_2");
        assert!([&first, &second, &third].iter().all(|n| n.chars().count() <= 31));
    }

    #[test]
    fn test_collision_is_case_insensitive() {
        let mut namer = SheetNamer::with_index_reserved();
        assert_eq!(namer.assign("index"), "index_1");
        assert!(namer.is_used("INDEX_1"));
        assert_eq!(namer.len(), 2);
    }

    #[test]
    fn test_multibyte_truncation() {
        let mut namer = SheetNamer::new();
        let name = namer.assign(&"µ".repeat(40));
        assert_eq!(name.chars().count(), 31);
    }

    #[test]
    fn test_unique_sheet_name_is_pure() {
        let used: HashSet<String> = ["f2_ch-220".to_string()].into_iter().collect();
        assert_eq!(unique_sheet_name("F2_ch-220", &used), "F2_ch-220_1");
        assert_eq!(unique_sheet_name("F2_ch-220", &used), "F2_ch-220_1");
    }

    proptest! {
        #[test]
        fn prop_assigned_names_unique_and_short(
            names in prop::collection::vec("[A-Za-z0-9:/?*_\\[\\]-]{0,40}", 1..60),
        ) {
            let mut namer = SheetNamer::new();
            let mut seen = HashSet::new();
            for candidate in &names {
                let name = namer.assign(&format!("F2_{candidate}"));
                prop_assert!(name.chars().count() <= MAX_SHEET_NAME_LEN);
                prop_assert!(!name.contains(&FORBIDDEN_SHEET_CHARS[..]));
                prop_assert!(seen.insert(name.to_lowercase()));
            }
        }
    }
}
