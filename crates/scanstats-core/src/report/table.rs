/// The combined comparison table.
///
/// Columns are fixed by the catalog and by the first record (the
/// reference): three identity columns, one column per catalogued scalar,
/// then one column per bucket of every catalogued histogram the reference
/// record contains. The extension histogram is never tabulated because its
/// labels differ from file to file.
use crate::catalog::{HISTOGRAM_TITLES, SCALAR_TITLES, TOP_EXTENSIONS_TITLE, TOTAL_SPACE_TITLE};
use crate::model::{HistogramValue, StatsRecord};
use tracing::{debug, warn};

/// Header label of the error-count column.
pub const ERRORS_COLUMN: &str = "Errors";

/// File name, error count, source path.
const IDENTITY_COLUMNS: usize = 3;

/// One table cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Blank,
    Number(u64),
    Text(String),
}

impl Cell {
    fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// The cell's text as written to the output file.
    pub fn render(&self) -> String {
        match self {
            Self::Blank => String::new(),
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
        }
    }
}

impl From<&HistogramValue> for Cell {
    fn from(value: &HistogramValue) -> Self {
        match value {
            HistogramValue::Count(n) => Self::Number(*n),
            HistogramValue::Raw(s) => Self::Text(s.clone()),
        }
    }
}

/// Two header rows and one row per record, all the same width.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComparisonTable {
    /// Histogram titles above the first bucket of each group.
    pub group_header: Vec<Cell>,
    /// Leaf column labels.
    pub column_header: Vec<Cell>,
    /// Data rows, largest total space first.
    pub rows: Vec<Vec<Cell>>,
    /// Records whose histograms did not match the reference layout.
    pub inconsistencies: Vec<String>,
}

impl ComparisonTable {
    /// Number of columns in every row.
    pub fn width(&self) -> usize {
        self.column_header.len()
    }

    /// Header rows followed by data rows.
    pub fn all_rows(&self) -> impl Iterator<Item = &[Cell]> {
        [self.group_header.as_slice(), self.column_header.as_slice()]
            .into_iter()
            .chain(self.rows.iter().map(Vec::as_slice))
    }
}

/// A histogram group in the output: its title and the reference labels.
struct Group<'a> {
    title: &'static str,
    labels: &'a [String],
}

/// Histogram groups present in the reference record, in catalog order.
fn reference_groups(reference: Option<&StatsRecord>) -> Vec<Group<'_>> {
    let Some(reference) = reference else {
        return Vec::new();
    };
    HISTOGRAM_TITLES
        .iter()
        .filter(|&&title| title != TOP_EXTENSIONS_TITLE)
        .filter_map(|&title| {
            let histogram = reference.histogram(title)?;
            (!histogram.is_empty()).then(|| Group {
                title,
                labels: histogram.labels(),
            })
        })
        .collect()
}

/// Combine `records` (in input order) into one table sorted by total space
/// used, descending. Records are not modified.
pub fn build_table(records: &[StatsRecord]) -> ComparisonTable {
    let groups = reference_groups(records.first());
    debug!(
        records = records.len(),
        groups = groups.len(),
        "building comparison table"
    );

    let mut table = ComparisonTable::default();

    table.group_header = vec![Cell::Blank; IDENTITY_COLUMNS + SCALAR_TITLES.len()];
    table.column_header = vec![Cell::Blank, Cell::text(ERRORS_COLUMN), Cell::Blank];
    table
        .column_header
        .extend(SCALAR_TITLES.iter().map(|&t| Cell::text(t)));

    for group in &groups {
        table.group_header.push(Cell::text(group.title));
        table
            .group_header
            .extend(std::iter::repeat(Cell::Blank).take(group.labels.len() - 1));
        table
            .column_header
            .extend(group.labels.iter().map(|l| Cell::text(l.as_str())));
    }

    let mut keyed: Vec<(Option<u64>, Vec<Cell>)> = records
        .iter()
        .map(|record| {
            let row = data_row(record, &groups, &mut table.inconsistencies);
            (record.scalar(TOTAL_SPACE_TITLE), row)
        })
        .collect();

    // Stable: equal totals keep input order. Missing totals sort last.
    keyed.sort_by(|a, b| b.0.cmp(&a.0));
    table.rows = keyed.into_iter().map(|(_, row)| row).collect();
    table
}

fn data_row(record: &StatsRecord, groups: &[Group<'_>], inconsistencies: &mut Vec<String>) -> Vec<Cell> {
    let mut row = Vec::with_capacity(IDENTITY_COLUMNS + SCALAR_TITLES.len());
    row.push(Cell::text(record.file_name.as_str()));
    row.push(match record.error_count {
        0 => Cell::Blank,
        n => Cell::Number(n),
    });
    row.push(record.source.as_deref().map_or(Cell::Blank, Cell::text));
    row.extend(
        SCALAR_TITLES
            .iter()
            .map(|&title| record.scalar(title).map_or(Cell::Blank, Cell::Number)),
    );

    for group in groups {
        let width = group.labels.len();
        let Some(histogram) = record.histogram(group.title) else {
            note(
                inconsistencies,
                format!("{}: no {:?} histogram", record.file_name, group.title),
            );
            row.extend(std::iter::repeat(Cell::Blank).take(width));
            continue;
        };

        if histogram.labels() != group.labels {
            note(
                inconsistencies,
                format!(
                    "{}: {:?} buckets differ from the first file ({} vs {})",
                    record.file_name,
                    group.title,
                    histogram.len(),
                    width
                ),
            );
        }
        row.extend(
            histogram
                .values()
                .iter()
                .map(Cell::from)
                .chain(std::iter::repeat(Cell::Blank))
                .take(width),
        );
    }
    row
}

fn note(inconsistencies: &mut Vec<String>, message: String) {
    warn!("{message}");
    inconsistencies.push(message);
}
