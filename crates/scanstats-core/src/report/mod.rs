/// Aggregation of parsed records into one comparison table, and export.
pub mod export;
pub mod table;

pub use export::{save_csv, save_records_json, write_csv};
pub use table::{build_table, Cell, ComparisonTable};
