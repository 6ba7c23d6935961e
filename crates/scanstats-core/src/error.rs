/// Error types for report parsing and export.
///
/// `ParseError` describes what went wrong inside a single report;
/// `StatsError` attaches the file (and line) it happened in.
use std::path::PathBuf;

use thiserror::Error;

/// A structural failure inside one report.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("unrecognised numeric value {0:?}")]
    BadNumber(String),

    #[error("histogram {title:?} is missing its {row} row")]
    MissingRow { title: String, row: &'static str },

    #[error("expected continuation of {expected:?}, found {found:?}")]
    ContinuationMismatch { expected: String, found: String },

    #[error("histogram {title:?} has {labels} labels but {values} values")]
    LengthMismatch {
        title: String,
        labels: usize,
        values: usize,
    },

    #[error("label {0:?} not found in its row")]
    Misaligned(String),

    #[error("no error count before {marker:?}")]
    MissingErrorCount { marker: &'static str },

    #[error("malformed csv: {0}")]
    Csv(#[from] csv::Error),
}

/// Crate-level error.
#[derive(Debug, Error)]
pub enum StatsError {
    #[error("no input files supplied")]
    NoInputFiles,

    #[error("i/o error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{file}: error on or near line {line}: {source}")]
    Parse {
        file: String,
        line: usize,
        #[source]
        source: ParseError,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to write record dump {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StatsError {
    /// Attach a file name and 1-based line number to a `ParseError`.
    pub fn parse(file: &str, line: usize, source: ParseError) -> Self {
        Self::Parse {
            file: file.to_string(),
            line,
            source,
        }
    }

    /// Line number near the failure, if this is a parse error.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Parse { line, .. } => Some(*line),
            _ => None,
        }
    }
}
