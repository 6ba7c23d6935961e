/// Parser for the fixed-width text report printed on Windows.
///
/// Relevant excerpt of a report:
///
/// ```text
/// xcp scan -stats \\filer\share
/// ...
/// == Space used ==
///      empty      <8KiB    8-64KiB 64KiB-1MiB    1-10MiB  10-100MiB    >100MiB
///          0    24.2MiB     680MiB    13.2GiB    34.2GiB    33.5GiB     159GiB
/// ...
/// Total space used: 241GiB
/// Regular files: 1.51M
/// ...
/// Total 1.52M scanned, 1.51M indexed, 860 errors, 15m2s.
/// ```
use crate::catalog::{self, FIELD_WIDTH, TEXT_SCAN_MARKER, TEXT_SOURCE_ROOT};
use crate::error::{ParseError, StatsError};
use crate::model::{Histogram, HistogramValue, StatsRecord};
use crate::parse::fixed_width::{extract, row_labels};
use crate::parse::number::normalize_value;
use crate::parse::{error_count_before_marker, ReportParser};
use tracing::{debug, warn};

/// Run summaries containing this text carry an error count.
const ERROR_LINE_MARKER: &str = " errors, ";

/// Parser for the fixed-width text table format.
#[derive(Debug, Default, Clone, Copy)]
pub struct WindowsReportParser;

impl ReportParser for WindowsReportParser {
    fn parse(&self, file_name: &str, text: &str) -> Result<StatsRecord, StatsError> {
        let lines: Vec<&str> = text.lines().collect();
        let mut record = StatsRecord::new(file_name);

        let mut i = 0;
        while i < lines.len() {
            let consumed = scan_line(&mut record, &lines, i)
                .map_err(|e| StatsError::parse(file_name, i + 1, e))?;
            i += 1 + consumed;
        }

        if record.source.is_none() {
            warn!(file = file_name, "no scan invocation line; source left blank");
        }
        Ok(record)
    }
}

/// Apply line `i` to `record`, returning how many following lines it
/// consumed.
fn scan_line(record: &mut StatsRecord, lines: &[&str], i: usize) -> Result<usize, ParseError> {
    let line = lines[i];

    if line.starts_with(TEXT_SCAN_MARKER) {
        if let Some(source) = line
            .split_whitespace()
            .find(|word| word.starts_with(TEXT_SOURCE_ROOT))
        {
            record.set_source_once(source);
        }
        return Ok(0);
    }

    if line.contains(ERROR_LINE_MARKER) {
        if let Some(count) = error_count_before_marker(line)? {
            record.observe_error_count(count);
        }
    }

    let title = section_title(line);
    if catalog::is_histogram(title) {
        let label_row = lines
            .get(i + 1)
            .filter(|row| !row_labels(row).is_empty())
            .ok_or_else(|| missing_row(title, "label"))?;
        let value_row = lines
            .get(i + 2)
            .filter(|row| !row.trim().is_empty())
            .ok_or_else(|| missing_row(title, "value"))?;

        let (labels, values): (Vec<String>, Vec<HistogramValue>) =
            extract(label_row, value_row, FIELD_WIDTH)?
                .into_iter()
                .map(|(label, value)| (label, HistogramValue::Count(value)))
                .unzip();
        debug!(title, buckets = labels.len(), line = i + 1, "histogram");
        record.insert_histogram(Histogram::new(title, labels, values)?);
        return Ok(2);
    }

    // Scalars start at column 0; indented text is never a scalar.
    if let Some((title, value)) = line.split_once(':') {
        if catalog::is_scalar(title) {
            record.insert_scalar(title, normalize_value(value)?);
        }
    }
    Ok(0)
}

/// `== Space used ==` → `Space used`.
fn section_title(line: &str) -> &str {
    let is_decoration = |c: char| c == '=' || c == ' ';
    line.trim()
        .trim_start_matches(is_decoration)
        .trim_end_matches(is_decoration)
}

fn missing_row(title: &str, row: &'static str) -> ParseError {
    ParseError::MissingRow {
        title: title.to_string(),
        row,
    }
}
