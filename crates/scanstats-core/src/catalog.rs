/// The vocabulary of the two report formats.
///
/// These lists are hand-maintained knowledge of the scanner's output, not
/// derived from input. Any title not listed here is ignored by the parsers.
/// Bump [`CATALOG_VERSION`] whenever a list changes so dumped records can be
/// matched to the vocabulary they were parsed with.

/// Version of the title lists below.
pub const CATALOG_VERSION: u32 = 1;

/// Histogram titles, in output column order.
///
/// "Created" only appears in text-table reports and "Changed" only in CSV
/// exports.
pub const HISTOGRAM_TITLES: &[&str] = &[
    "Maximum Values",
    "Average Values",
    "Space used",
    "Top File Extensions",
    "Number of files",
    "Directory entries",
    "Depth",
    "Modified",
    "Created",
    "Changed",
];

/// Scalar titles, in output column order.
///
/// "Junctions" only appears in text-table reports and "Hard links" only in
/// CSV exports.
pub const SCALAR_TITLES: &[&str] = &[
    "Total space used",
    "Regular files",
    "Directories",
    "Symbolic links",
    "Junctions",
    "Hard links",
    "Special files",
];

/// Histogram whose labels depend on the scanned content. Never tabulated.
pub const TOP_EXTENSIONS_TITLE: &str = "Top File Extensions";

/// Scalar the comparison rows are sorted by, descending.
pub const TOTAL_SPACE_TITLE: &str = "Total space used";

/// Labels of the age histogram. They contain spaces, so the label row
/// cannot be split on whitespace.
pub const AGE_BUCKET_LABELS: &[&str] = &[
    ">1 year",
    ">1 month",
    "1-31 days",
    "1-24 hrs",
    "<1 hour",
    "<15 mins",
    "future",
    "invalid",
];

/// A label row containing this text is an age histogram.
pub const AGE_BUCKET_MARKER: &str = ">1 year";

/// Width of one right-aligned value field in the text-table format.
pub const FIELD_WIDTH: usize = 9;

/// Prefix of the scan invocation line in text-table reports.
pub const TEXT_SCAN_MARKER: &str = "xcp scan";

/// First character of the scanned share path in text-table reports.
pub const TEXT_SOURCE_ROOT: char = '\\';

/// First field (or first word) of the scan invocation line in CSV exports.
pub const CSV_SCAN_MARKER: &str = "scan";

/// First field of the free-text summary row in CSV exports.
pub const CSV_SUMMARY_MARKER: &str = "summary";

/// Word that follows the error count in run summaries.
pub const ERROR_COUNT_MARKER: &str = "errors,";

/// Whether `title` is a recognised histogram.
pub fn is_histogram(title: &str) -> bool {
    HISTOGRAM_TITLES.contains(&title)
}

/// Whether `title` is a recognised scalar.
pub fn is_scalar(title: &str) -> bool {
    SCALAR_TITLES.contains(&title)
}
