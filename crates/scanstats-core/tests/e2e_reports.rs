/// End-to-end tests: reports on disk → parsed records → comparison CSV.
///
/// Each test writes small but realistic reports into a temporary directory,
/// runs them through `parse_files`, builds the table, and inspects the bytes
/// written by `save_csv`.
use scanstats_core::catalog::SCALAR_TITLES;
use scanstats_core::parse::parse_files;
use scanstats_core::report::{build_table, save_csv};
use scanstats_core::{StatsError, StatsRecord};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ── Helpers ──────────────────────────────────────────────────────────────────

/// A text-table report for `share` with `total_gib` GiB used.
fn text_report(share: &str, total_gib: u64, errors: u64) -> String {
    format!(
        "xcp scan -stats \\\\filer\\{share}
Job ID: Job_2020-08-29_10.11.12.000000_scan

== Top File Extensions ==
      .zip       .pdf      other
     19507      16328      22047

== Space used ==
     empty      <8KiB    8-64KiB 64KiB-1MiB
         0    24.2MiB     680MiB    13.2GiB

== Created ==
  >1 year >1 month 1-31 days  1-24 hrs   <1 hour  <15 mins    future   invalid
     1.2M     120K     30.5K      1000        12         3         0         0

Total space used: {total_gib}GiB
Regular files: 510,000
Directories: 98,122
Symbolic links: 0
Junctions: 4
Special files: 0
Total 1.52M scanned, 1.51M indexed, {errors} errors, 15m3s.
"
    )
}

/// A CSV export equivalent to `text_report(_, 1449, 860)` apart from the
/// platform-specific categories.
const CSV_EXPORT: &str = "\
scan server01:/export/eng
Space used,empty,<8KiB,8-64KiB,64KiB-1MiB
Space used,0,25375539,713031680,14173392076
Changed,>1 year,>1 month,1-31 days,1-24 hrs,<1 hour,<15 mins,future,invalid
Changed,1200000,120000,30500,1000,12,3,0,0
Total space used,1555851902976
Regular files,510000
Directories,98122
Symbolic links,0
Hard links,17
Special files,0
summary,\"1.52M scanned, 1.51M indexed, 860 errors, 325 MiB in (1.10 MiB/s), 4m54s.\"
";

fn write(dir: &Path, name: &str, text: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, text).unwrap();
    path
}

fn parse_ok(paths: &[PathBuf]) -> Vec<StatsRecord> {
    parse_files(paths)
        .unwrap()
        .into_iter()
        .map(|r| r.unwrap())
        .collect()
}

fn output_lines(dir: &Path, records: &[StatsRecord]) -> Vec<String> {
    let out = dir.join("stats.csv");
    save_csv(&build_table(records), &out).unwrap();
    fs::read_to_string(out)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

/// Rows come out largest total first, with identical column counts.
#[test]
fn batch_of_text_reports_is_sorted_and_aligned() {
    let tmp = TempDir::new().unwrap();
    let paths = [
        write(tmp.path(), "a.txt", &text_report("a", 100, 0)),
        write(tmp.path(), "b.txt", &text_report("b", 300, 7)),
        write(tmp.path(), "c.txt", &text_report("c", 200, 0)),
    ];
    let records = parse_ok(&paths);
    let lines = output_lines(tmp.path(), &records);

    assert_eq!(lines.len(), 5, "two headers and three rows");
    let commas: Vec<usize> = lines.iter().map(|l| l.matches(',').count()).collect();
    assert!(commas.iter().all(|&c| c == commas[0]), "{commas:?}");

    // 3 identity + scalars + 4 "Space used" + 8 "Created" columns.
    assert_eq!(commas[0] + 1, 3 + SCALAR_TITLES.len() + 4 + 8);
    assert!(lines[0].contains("\"Space used\""));
    assert!(lines[0].contains("\"Created\""));
    assert!(!lines[0].contains("Top File Extensions"));
    assert!(lines[1].starts_with("\"\",\"Errors\",\"\",\"Total space used\""));

    let order: Vec<&str> = lines[2..]
        .iter()
        .map(|l| l.split(',').next().unwrap())
        .collect();
    let name = |p: &PathBuf| format!("\"{}\"", p.to_string_lossy());
    assert_eq!(order, [name(&paths[1]), name(&paths[2]), name(&paths[0])]);

    let b_row = &lines[2];
    assert!(b_row.contains(&format!(",7,\"\\\\filer\\b\",{},", 300u64 << 30)));
    let a_row = &lines[4];
    assert!(a_row.contains(&format!(",\"\",\"\\\\filer\\a\",{},", 100u64 << 30)));
}

/// The same underlying scan reported in both formats yields the same
/// scalar values.
#[test]
fn text_and_csv_reports_agree_on_shared_scalars() {
    let tmp = TempDir::new().unwrap();
    let paths = [
        write(tmp.path(), "smb.txt", &text_report("eng", 1449, 860)),
        write(tmp.path(), "nfs.csv", CSV_EXPORT),
    ];
    let records = parse_ok(&paths);
    let (smb, nfs) = (&records[0], &records[1]);

    let mut shared = 0;
    for title in SCALAR_TITLES {
        if let (Some(a), Some(b)) = (smb.scalar(title), nfs.scalar(title)) {
            assert_eq!(a, b, "{title}");
            shared += 1;
        }
    }
    assert_eq!(shared, 5);
    assert_eq!(smb.error_count, nfs.error_count);
    assert_eq!(
        smb.histogram("Space used").unwrap().values(),
        nfs.histogram("Space used").unwrap().values()
    );
}

/// With a CSV export first, text-only categories are dropped from every row.
#[test]
fn reference_file_decides_histogram_columns() {
    let tmp = TempDir::new().unwrap();
    let paths = [
        write(tmp.path(), "nfs.csv", CSV_EXPORT),
        write(tmp.path(), "smb.txt", &text_report("eng", 10, 0)),
    ];
    let records = parse_ok(&paths);
    let table = build_table(&records);

    assert!(table
        .group_header
        .iter()
        .all(|c| c.render() != "Created"));
    assert!(table.group_header.iter().any(|c| c.render() == "Changed"));
    for row in &table.rows {
        assert_eq!(row.len(), table.width());
    }
    // The text report has no "Changed" histogram.
    assert_eq!(table.inconsistencies.len(), 1);
}

/// A malformed report fails alone; the rest of the batch still parses.
#[test]
fn malformed_report_does_not_affect_others() {
    let tmp = TempDir::new().unwrap();
    let paths = [
        write(tmp.path(), "good.txt", &text_report("ok", 1, 0)),
        write(
            tmp.path(),
            "bad.csv",
            "Maximum Values,Size,Used\nAverage Values,1,2\n",
        ),
        write(tmp.path(), "good.csv", CSV_EXPORT),
    ];
    let results = parse_files(&paths).unwrap();

    assert!(results[0].is_ok());
    assert!(results[2].is_ok());
    let err = results[1].as_ref().unwrap_err();
    assert_eq!(err.line(), Some(2));
    assert!(err.to_string().contains("bad.csv: error on or near line 2"));
}

/// Building and writing twice produces byte-identical output.
#[test]
fn output_is_reproducible() {
    let tmp = TempDir::new().unwrap();
    let paths = [
        write(tmp.path(), "x.txt", &text_report("x", 5, 1)),
        write(tmp.path(), "y.txt", &text_report("y", 9, 2)),
    ];
    let records = parse_ok(&paths);
    let first = output_lines(tmp.path(), &records);
    let second = output_lines(tmp.path(), &records);
    assert_eq!(first, second);
}

#[test]
fn no_inputs_is_a_configuration_error() {
    assert!(matches!(parse_files(&[]), Err(StatsError::NoInputFiles)));
}
