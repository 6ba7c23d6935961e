/// Report parsing — format dispatch and the shared parser interface.
///
/// Two independent parsers produce the same [`StatsRecord`]:
/// - [`windows::WindowsReportParser`] — the fixed-width text table printed
///   by the scanner on Windows.
/// - [`csv_export::CsvReportParser`] — the comma-separated export written
///   on Linux.
///
/// The format is chosen from the file extension only; contents are never
/// sniffed.
pub mod csv_export;
pub mod fixed_width;
pub mod number;
pub mod windows;

use crate::catalog::{ERROR_COUNT_MARKER, TOTAL_SPACE_TITLE};
use crate::error::{ParseError, StatsError};
use crate::model::size::{format_count, format_size};
use crate::model::StatsRecord;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub use csv_export::CsvReportParser;
pub use windows::WindowsReportParser;

/// Turns the full text of one report into a [`StatsRecord`].
///
/// Implementations hold no state between calls and may be shared across
/// threads.
pub trait ReportParser: Sync {
    fn parse(&self, file_name: &str, text: &str) -> Result<StatsRecord, StatsError>;
}

/// The two supported report layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// Fixed-width text table.
    Windows,
    /// Comma-separated export.
    Csv,
}

impl ReportFormat {
    /// `.csv` files (any case) are CSV exports; everything else is a text
    /// table.
    pub fn from_path(path: &Path) -> Self {
        match path.extension() {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Self::Csv,
            _ => Self::Windows,
        }
    }

    pub fn parser(self) -> &'static dyn ReportParser {
        match self {
            Self::Windows => &WindowsReportParser,
            Self::Csv => &CsvReportParser,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Windows => "text table",
            Self::Csv => "csv export",
        }
    }
}

/// Read and parse one report.
///
/// Invalid UTF-8 is replaced rather than rejected; report text outside the
/// recognised sections is ignored anyway.
pub fn parse_file(path: &Path) -> Result<StatsRecord, StatsError> {
    let bytes = std::fs::read(path).map_err(|source| StatsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8_lossy(&bytes);
    let file_name = path.to_string_lossy();
    let format = ReportFormat::from_path(path);
    debug!(file = %file_name, format = format.label(), "parsing report");

    let record = format.parser().parse(&file_name, &text)?;

    info!(
        file = %file_name,
        total_space = %record.scalar(TOTAL_SPACE_TITLE).map(format_size).unwrap_or_default(),
        errors = %format_count(record.error_count),
        histograms = record.histograms.len(),
        scalars = record.scalars.len(),
        "parsed report"
    );
    Ok(record)
}

/// Parse every report independently, in parallel.
///
/// The result vector is in input order. A failure in one file does not
/// affect the others.
pub fn parse_files(paths: &[PathBuf]) -> Result<Vec<Result<StatsRecord, StatsError>>, StatsError> {
    if paths.is_empty() {
        return Err(StatsError::NoInputFiles);
    }

    let csv_count = paths
        .iter()
        .filter(|p| ReportFormat::from_path(p) == ReportFormat::Csv)
        .count();
    if csv_count != 0 && csv_count != paths.len() {
        warn!(
            csv = csv_count,
            text = paths.len() - csv_count,
            "mixing report formats; columns follow the first file's layout"
        );
    }

    Ok(paths.par_iter().map(|p| parse_file(p)).collect())
}

/// The error count printed immediately before `errors,` in a run summary
/// such as `1.52M scanned, 1.51M indexed, 860 errors, 325 MiB in`.
///
/// Returns `None` when the marker word is absent.
pub(crate) fn error_count_before_marker(text: &str) -> Result<Option<u64>, ParseError> {
    let words: Vec<&str> = text.split_whitespace().collect();
    match words.iter().position(|w| *w == ERROR_COUNT_MARKER) {
        None => Ok(None),
        Some(0) => Err(ParseError::MissingErrorCount {
            marker: ERROR_COUNT_MARKER,
        }),
        Some(i) => number::normalize_value(words[i - 1]).map(Some),
    }
}
