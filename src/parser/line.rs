use std::sync::LazyLock;

use regex::Regex;

/// Signed decimal: optional minus, digits, optional fraction.
const NUMBER: &str = r"-?[0-9]+(?:\.[0-9]+)?";

/// Classification of one non-blank, trimmed line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineKind {
    /// `FUNCTION <n>`: start of a function block
    Function(i64),
    /// `Scan <n>`
    Scan(i64),
    /// `Retention Time <t>`
    RetentionTime(f64),
    /// Two numbers separated by whitespace
    DataPair(f64, f64),
    /// Anything else (headers, units, garbage)
    Unrecognized,
}

struct LinePatterns {
    function: Regex,
    scan: Regex,
    retention_time: Regex,
    data_pair: Regex,
}

impl LinePatterns {
    fn compile() -> Self {
        Self {
            function: compile_pattern(r"(?i)^FUNCTION\s+([0-9]+)$"),
            scan: compile_pattern(r"(?i)^Scan\s+([0-9]+)$"),
            retention_time: compile_pattern(&format!(r"(?i)^Retention\s+Time\s+({NUMBER})$")),
            data_pair: compile_pattern(&format!(r"^({NUMBER})\s+({NUMBER})$")),
        }
    }
}

fn compile_pattern(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in line pattern must compile")
}

static PATTERNS: LazyLock<LinePatterns> = LazyLock::new(LinePatterns::compile);

/// Classify a raw line. Returns `None` for blank lines.
///
/// Markers are tried before the data-pair pattern, so a line is never read as
/// both. A marker whose number does not fit an `i64` is treated as unrecognized.
pub fn classify_line(line: &str) -> Option<LineKind> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let patterns = &*PATTERNS;

    if let Some(caps) = patterns.function.captures(line) {
        return Some(parse_or_unrecognized(&caps[1], LineKind::Function));
    }
    if let Some(caps) = patterns.scan.captures(line) {
        return Some(parse_or_unrecognized(&caps[1], LineKind::Scan));
    }
    if let Some(caps) = patterns.retention_time.captures(line) {
        return Some(parse_or_unrecognized(&caps[1], LineKind::RetentionTime));
    }
    if let Some(caps) = patterns.data_pair.captures(line) {
        return Some(match (caps[1].parse::<f64>(), caps[2].parse::<f64>()) {
            (Ok(first), Ok(second)) => LineKind::DataPair(first, second),
            _ => LineKind::Unrecognized,
        });
    }

    Some(LineKind::Unrecognized)
}

fn parse_or_unrecognized<T: std::str::FromStr>(
    token: &str,
    make: impl FnOnce(T) -> LineKind,
) -> LineKind {
    token.parse::<T>().map(make).unwrap_or(LineKind::Unrecognized)
}
