//! ScanStats — merge filesystem scan summary reports into one comparison
//! spreadsheet.
//!
//! Thin binary entry point. All logic lives in the `scanstats-core` crate.

use anyhow::Context;
use clap::Parser;
use scanstats_core::report::{self, export::DEFAULT_OUTPUT};
use scanstats_core::{parse, StatsRecord};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Combine scan statistics reports (text tables and .csv exports) into one CSV, largest first"
)]
struct Args {
    /// Report files. Files ending in .csv are read as CSV exports, all
    /// others as text-table output.
    files: Vec<PathBuf>,

    /// Where to write the combined table.
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Also dump every parsed record as JSON.
    #[arg(long, value_name = "PATH")]
    json: Option<PathBuf>,

    /// Log each recognised section.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Logs go to stderr; stdout carries only the summary line.
    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(files = args.files.len(), "ScanStats starting");

    let mut records: Vec<StatsRecord> = Vec::with_capacity(args.files.len());
    let mut failed = 0usize;
    for result in parse::parse_files(&args.files)? {
        match result {
            Ok(record) => records.push(record),
            Err(e) => {
                failed += 1;
                eprintln!("** {e}");
            }
        }
    }

    if records.is_empty() {
        anyhow::bail!("none of the {} report(s) could be parsed", args.files.len());
    }

    let table = report::build_table(&records);
    let with_errors = records.iter().filter(|r| r.error_count > 0).count();
    println!(
        "Processed {} files; {} had errors; saving csv in {}",
        args.files.len(),
        with_errors,
        args.output.display()
    );

    report::save_csv(&table, &args.output)
        .with_context(|| format!("failed to save {}", args.output.display()))?;

    if let Some(path) = &args.json {
        report::save_records_json(&records, path)
            .with_context(|| format!("failed to save {}", path.display()))?;
    }

    if failed > 0 {
        anyhow::bail!("{failed} of {} report(s) could not be parsed", args.files.len());
    }
    Ok(())
}
