/// Parser for the comma-separated statistics export written on Linux.
///
/// Histograms occupy two rows that repeat the title: the first carries the
/// bucket labels, the second the values.
///
/// ```text
/// scan server:/export/eng
/// Maximum Values,Size,Used,Depth,Namelen,Dirsize
/// Maximum Values,14579924992,19489326592,19,162,8166
/// Total count,587405
/// summary,"1.52M scanned, 1.51M indexed, 860 errors, 325 MiB in (1.10 MiB/s), 4m54s."
/// ```
///
/// Scalars are single rows whose second field is a plain integer.
use crate::catalog::{self, CSV_SCAN_MARKER, CSV_SUMMARY_MARKER, ERROR_COUNT_MARKER};
use crate::error::{ParseError, StatsError};
use crate::model::{Histogram, HistogramValue, StatsRecord};
use crate::parse::number::normalize_value;
use crate::parse::{error_count_before_marker, ReportParser};
use csv::StringRecord;
use tracing::{debug, warn};

/// Parser for the CSV export format.
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvReportParser;

/// A CSV row and the 1-based line it started on.
struct Row {
    line: usize,
    fields: StringRecord,
}

impl Row {
    fn title(&self) -> &str {
        self.fields.get(0).unwrap_or("")
    }

    fn rest(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().skip(1)
    }
}

impl ReportParser for CsvReportParser {
    fn parse(&self, file_name: &str, text: &str) -> Result<StatsRecord, StatsError> {
        let rows = read_rows(file_name, text)?;
        let mut record = StatsRecord::new(file_name);

        let mut i = 0;
        while i < rows.len() {
            let consumed = scan_row(&mut record, &rows, i)
                .map_err(|(line, e)| StatsError::parse(file_name, line, e))?;
            i += 1 + consumed;
        }

        if record.source.is_none() {
            warn!(file = file_name, "no scan row; source left blank");
        }
        Ok(record)
    }
}

/// Split the export into rows. Fields are trimmed and rows may differ in
/// length.
fn read_rows(file_name: &str, text: &str) -> Result<Vec<Row>, StatsError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for result in reader.records() {
        let fields = result.map_err(|e| {
            let line = e.position().map_or(0, |p| p.line() as usize);
            StatsError::parse(file_name, line, ParseError::Csv(e))
        })?;
        let line = fields.position().map_or(0, |p| p.line() as usize);
        rows.push(Row { line, fields });
    }
    Ok(rows)
}

/// Apply row `i` to `record`, returning how many following rows it
/// consumed. Errors carry the line they were found on.
fn scan_row(record: &mut StatsRecord, rows: &[Row], i: usize) -> Result<usize, (usize, ParseError)> {
    let row = &rows[i];
    let title = row.title();
    let at = |line: usize| move |e: ParseError| (line, e);

    if let Some(source) = scan_source(row) {
        record.set_source_once(source);
        return Ok(0);
    }

    if title == CSV_SUMMARY_MARKER {
        let summary = row.fields.get(1).unwrap_or("");
        if summary.contains(ERROR_COUNT_MARKER) {
            if let Some(count) = error_count_before_marker(summary).map_err(at(row.line))? {
                record.observe_error_count(count);
            }
        }
        return Ok(0);
    }

    if catalog::is_histogram(title) {
        let labels: Vec<String> = row.rest().map(str::to_string).collect();
        let next = rows.get(i + 1).ok_or_else(|| {
            (
                row.line,
                ParseError::MissingRow {
                    title: title.to_string(),
                    row: "value",
                },
            )
        })?;
        if next.title() != title {
            return Err((
                next.line,
                ParseError::ContinuationMismatch {
                    expected: title.to_string(),
                    found: next.title().to_string(),
                },
            ));
        }
        let values = next.rest().map(bucket_value).collect();
        let histogram = Histogram::new(title, labels, values).map_err(at(next.line))?;
        debug!(title, buckets = histogram.len(), line = row.line, "histogram");
        record.insert_histogram(histogram);
        return Ok(1);
    }

    if catalog::is_scalar(title) {
        let raw = row.fields.get(1).unwrap_or("");
        let value = raw
            .parse::<u64>()
            .map_err(|_| (row.line, ParseError::BadNumber(raw.to_string())))?;
        record.insert_scalar(title, value);
    }
    Ok(0)
}

/// Scanned path from a `scan` row: either the second field, or the second
/// word when the whole invocation sits in the first field.
fn scan_source(row: &Row) -> Option<&str> {
    let title = row.title();
    if title == CSV_SCAN_MARKER {
        return row.fields.get(1).filter(|s| !s.is_empty());
    }
    let mut words = title.split_whitespace();
    if words.next() == Some(CSV_SCAN_MARKER) {
        return words.next();
    }
    None
}

/// Exports hold plain integers, but anything else is kept verbatim rather
/// than rejected.
fn bucket_value(raw: &str) -> HistogramValue {
    match normalize_value(raw) {
        Ok(n) => HistogramValue::Count(n),
        Err(_) => HistogramValue::Raw(raw.to_string()),
    }
}
