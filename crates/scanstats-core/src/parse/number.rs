/// Decoding of human-formatted numbers such as `24.2MiB`, `1.52M` or
/// `1,234`.
use crate::error::ParseError;

/// Binary size suffixes. Checked before [`COUNT_SUFFIXES`] because `KiB`
/// also ends in the count suffix `B`.
const SIZE_SUFFIXES: &[(&str, u64)] = &[
    ("KiB", 1 << 10),
    ("MiB", 1 << 20),
    ("GiB", 1 << 30),
    ("TiB", 1 << 40),
];

/// Decimal count suffixes (thousand, million, billion, trillion).
const COUNT_SUFFIXES: &[(&str, u64)] = &[
    ("K", 1_000),
    ("M", 1_000_000),
    ("B", 1_000_000_000),
    ("T", 1_000_000_000_000),
];

/// A decoded number together with the text it was decoded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    /// Input with surrounding whitespace removed.
    pub display: String,
    pub value: u64,
}

/// Decode a report number.
///
/// Blank input decodes to zero. Suffixed values are parsed as floating
/// point, scaled, and truncated; everything else must be a plain
/// non-negative integer.
pub fn normalize(raw: &str) -> Result<Normalized, ParseError> {
    let display = raw.trim().to_string();
    let value = decode(&display).ok_or_else(|| ParseError::BadNumber(display.clone()))?;
    Ok(Normalized { display, value })
}

/// [`normalize`] without the display text.
pub fn normalize_value(raw: &str) -> Result<u64, ParseError> {
    normalize(raw).map(|n| n.value)
}

fn decode(trimmed: &str) -> Option<u64> {
    let digits: String = trimmed.chars().filter(|&c| c != ',').collect();
    let digits = digits.trim();
    if digits.is_empty() {
        return Some(0);
    }

    let suffixed = SIZE_SUFFIXES
        .iter()
        .chain(COUNT_SUFFIXES)
        .find_map(|&(suffix, factor)| digits.strip_suffix(suffix).map(|p| (p, factor)));

    match suffixed {
        Some((prefix, factor)) => {
            let x: f64 = prefix.trim().parse().ok()?;
            if !x.is_finite() || x < 0.0 {
                return None;
            }
            Some((x * factor as f64) as u64)
        }
        None => digits.parse().ok(),
    }
}
