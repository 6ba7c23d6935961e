/// Writing the comparison table as CSV and parsed records as JSON.
use crate::catalog::CATALOG_VERSION;
use crate::error::StatsError;
use crate::model::StatsRecord;
use crate::report::table::{Cell, ComparisonTable};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Default name of the combined output file.
pub const DEFAULT_OUTPUT: &str = "stats.csv";

/// Write `table` as CSV: both header rows, then the data rows.
///
/// Numeric cells are written bare; every other cell, blanks included, is
/// double-quoted whatever its text looks like.
pub fn write_csv<W: Write>(table: &ComparisonTable, out: W) -> Result<(), csv::Error> {
    // Quoting is applied per cell in `csv_field`.
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Never)
        .from_writer(out);
    for row in table.all_rows() {
        writer.write_record(row.iter().map(csv_field))?;
    }
    writer.flush()?;
    Ok(())
}

fn csv_field(cell: &Cell) -> String {
    match cell {
        Cell::Number(n) => n.to_string(),
        Cell::Blank | Cell::Text(_) => format!("\"{}\"", cell.render().replace('"', "\"\"")),
    }
}

/// [`write_csv`] into a newly created file at `path`.
pub fn save_csv(table: &ComparisonTable, path: &Path) -> Result<(), StatsError> {
    let file = create(path)?;
    write_csv(table, BufWriter::new(file)).map_err(|source| StatsError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), rows = table.rows.len(), "wrote comparison table");
    Ok(())
}

#[derive(Serialize)]
struct RecordDump<'a> {
    catalog_version: u32,
    records: &'a [StatsRecord],
}

/// Dump parsed records as pretty-printed JSON, tagged with the catalog
/// version they were parsed against.
pub fn save_records_json(records: &[StatsRecord], path: &Path) -> Result<(), StatsError> {
    let file = create(path)?;
    let dump = RecordDump {
        catalog_version: CATALOG_VERSION,
        records,
    };
    let mut out = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut out, &dump).map_err(|source| StatsError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    out.flush().map_err(|source| StatsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), records = records.len(), "wrote record dump");
    Ok(())
}

fn create(path: &Path) -> Result<File, StatsError> {
    File::create(path).map_err(|source| StatsError::Io {
        path: path.to_path_buf(),
        source,
    })
}
