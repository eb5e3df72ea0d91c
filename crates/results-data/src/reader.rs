//! Shard discovery and CSV loading.
//!
//! Shards are the `results_part_*.csv` files written by parallel evaluation
//! workers. The merger reads them as schema-less [`RawTable`]s; the figure
//! renderer reads the merged file as typed [`ResultRow`]s.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use results_core::error::{Result, ResultsError};
use results_core::models::{RawTable, ResultRow, REQUIRED_COLUMNS};
use tracing::{debug, warn};

/// File-name pattern of result shards, matched against the bare file name.
pub const SHARD_FILE_PATTERN: &str = r"^results_part_.*\.csv$";

fn shard_regex() -> &'static Regex {
    static SHARD_RE: OnceLock<Regex> = OnceLock::new();
    SHARD_RE.get_or_init(|| Regex::new(SHARD_FILE_PATTERN).expect("regex is valid"))
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Returns `true` when `file_name` follows the shard naming convention.
pub fn is_shard_file_name(file_name: &str) -> bool {
    shard_regex().is_match(file_name)
}

/// Find all shard files directly inside `input_dir`, sorted by file name.
///
/// Subdirectories are not searched. A missing directory yields an empty list.
pub fn find_shard_files(input_dir: &Path) -> Vec<PathBuf> {
    if !input_dir.is_dir() {
        warn!("Input directory does not exist: {}", input_dir.display());
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(input_dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .file_name()
                    .to_str()
                    .map(is_shard_file_name)
                    .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect();

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    debug!(
        "Found {} shard files in {}",
        files.len(),
        input_dir.display()
    );
    files
}

/// Read a CSV file into a [`RawTable`] without interpreting any column.
///
/// Rows whose field count differs from the header are rejected.
pub fn read_table(path: &Path) -> Result<RawTable> {
    let mut reader = open_csv(path)?;

    let columns: Vec<String> = reader
        .headers()
        .map_err(|e| ResultsError::csv(path, e))?
        .iter()
        .map(String::from)
        .collect();
    if columns.is_empty() {
        return Err(ResultsError::EmptyTable(path.to_path_buf()));
    }

    let records = reader
        .records()
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| ResultsError::csv(path, e))?;

    debug!(
        "Read {} rows x {} columns from {}",
        records.len(),
        columns.len(),
        path.display()
    );

    Ok(RawTable { columns, records })
}

/// Load a merged results table as typed rows.
///
/// Fails when the file cannot be read, lacks one of [`REQUIRED_COLUMNS`], or
/// holds a non-empty value that does not parse. Empty cells load as missing
/// values. Extra columns are ignored.
pub fn load_result_rows(path: &Path) -> Result<Vec<ResultRow>> {
    let mut reader = open_csv(path)?;

    let headers = reader
        .headers()
        .map_err(|e| ResultsError::csv(path, e))?
        .clone();
    if headers.is_empty() {
        return Err(ResultsError::EmptyTable(path.to_path_buf()));
    }
    if let Some(missing) = REQUIRED_COLUMNS
        .iter()
        .find(|column| !headers.iter().any(|h| h == **column))
    {
        return Err(ResultsError::MissingColumn {
            path: path.to_path_buf(),
            column: missing.to_string(),
        });
    }

    let rows = reader
        .deserialize::<ResultRow>()
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| ResultsError::csv(path, e))?;

    debug!("Loaded {} result rows from {}", rows.len(), path.display());
    let incomplete = rows.iter().filter(|row| !row.is_complete()).count();
    if incomplete > 0 {
        debug!(
            "{} rows in {} have empty cells and will not be plotted",
            incomplete,
            path.display()
        );
    }
    Ok(rows)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn open_csv(path: &Path) -> Result<csv::Reader<File>> {
    let file = File::open(path).map_err(|source| ResultsError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(csv::Reader::from_reader(file))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
