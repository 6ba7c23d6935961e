/// ScanStats Core — report parsing, normalisation, and aggregation.
///
/// This crate contains all business logic with zero CLI dependencies.
/// It turns scan summary reports (fixed-width text tables and CSV exports)
/// into one comparison table.
///
/// # Modules
///
/// - [`catalog`] — The recognised histogram and scalar titles.
/// - [`model`] — The unified per-file statistics record and size formatting.
/// - [`parse`] — Numeric normaliser, fixed-width extractor, and both report parsers.
/// - [`report`] — Aggregation into a sorted comparison table and CSV/JSON export.
/// - [`error`] — Error types shared across the crate.
pub mod catalog;
pub mod error;
pub mod model;
pub mod parse;
pub mod report;

pub use error::{ParseError, StatsError};
pub use model::StatsRecord;
