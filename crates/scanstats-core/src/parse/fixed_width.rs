/// Extraction of label/value pairs from a visually aligned two-row table.
///
/// Text-table reports print each histogram as a label row with the values
/// right-aligned underneath:
///
/// ```text
///      empty      <8KiB    8-64KiB 64KiB-1MiB    1-10MiB  10-100MiB    >100MiB
///          0    24.2MiB     680MiB    13.2GiB    34.2GiB    33.5GiB     159GiB
/// ```
///
/// There are no delimiters, so each value is recovered by finding where its
/// label ends and slicing the `width` characters of the value row that end
/// at the same column. Columns count characters, not bytes.
use crate::catalog::{AGE_BUCKET_LABELS, AGE_BUCKET_MARKER};
use crate::error::ParseError;
use crate::parse::number::normalize_value;

/// Labels of a label row, in order.
///
/// Age histograms use the fixed [`AGE_BUCKET_LABELS`] list; every other row
/// is split on whitespace.
pub fn row_labels(label_row: &str) -> Vec<&str> {
    if label_row.contains(AGE_BUCKET_MARKER) {
        AGE_BUCKET_LABELS.to_vec()
    } else {
        label_row.split_whitespace().collect()
    }
}

/// Pair every label in `label_row` with the decoded value aligned under it.
pub fn extract(
    label_row: &str,
    value_row: &str,
    width: usize,
) -> Result<Vec<(String, u64)>, ParseError> {
    let mut cursor = 0;
    let mut pairs = Vec::new();

    for label in row_labels(label_row) {
        let start = label_row[cursor..]
            .find(label)
            .map(|pos| cursor + pos)
            .ok_or_else(|| ParseError::Misaligned(label.to_string()))?;
        let end = start + label.len();
        cursor = end;

        let end_col = label_row[..end].chars().count();
        let field = value_field(value_row, end_col, width);
        pairs.push((label.to_string(), normalize_value(field)?));
    }

    Ok(pairs)
}

/// The `width` characters of `row` ending before column `end_col`, clipped
/// to the row.
fn value_field(row: &str, end_col: usize, width: usize) -> &str {
    let byte_at = |col: usize| row.char_indices().nth(col).map_or(row.len(), |(b, _)| b);
    &row[byte_at(end_col.saturating_sub(width))..byte_at(end_col)]
}
