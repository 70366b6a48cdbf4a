const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Text recovered from raw file bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    /// Decoded text with invalid byte sequences removed
    pub text: String,
    /// Number of bytes that were not valid UTF-8 and were dropped
    pub dropped_bytes: usize,
}

/// Decode bytes as UTF-8, silently dropping invalid sequences.
///
/// This is a lossy operation by contract: a stray Latin-1 degree sign in a
/// header never costs the numeric lines of the file. A leading UTF-8 byte-order
/// mark is removed so it cannot hide a `FUNCTION` marker on the first line.
pub fn decode_lossy(bytes: &[u8]) -> DecodedText {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    let mut text = String::with_capacity(bytes.len());
    let mut dropped_bytes = 0;
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
        dropped_bytes += chunk.invalid().len();
    }

    DecodedText {
        text,
        dropped_bytes,
    }
}
