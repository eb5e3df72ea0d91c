//! Concatenation of result shards into one merged table.

use std::fs::File;
use std::path::{Path, PathBuf};

use csv::StringRecord;
use results_core::error::{Result, ResultsError};
use results_core::models::RawTable;
use tracing::{debug, info};

use crate::reader::{find_shard_files, read_table};

// ── MergeOutcome ──────────────────────────────────────────────────────────────

/// Counts reported after a successful merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeSummary {
    /// Number of shard files that were concatenated.
    pub parts: usize,
    /// Number of data rows written.
    pub rows: usize,
    /// Where the merged table was written.
    pub output: PathBuf,
}

/// Result of a merge run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// No shard matched; nothing was written.
    NoParts,
    Merged(MergeSummary),
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Merge every shard in `input_dir` into a single CSV at `output`.
///
/// Shards are concatenated in file-name order, each keeping its own row
/// order. Columns are not validated across shards: the output header is the
/// union of all shard headers and absent cells are left empty.
pub fn merge_shards(input_dir: &Path, output: &Path) -> Result<MergeOutcome> {
    let parts = find_shard_files(input_dir);
    if parts.is_empty() {
        info!("No shard files found in {}", input_dir.display());
        return Ok(MergeOutcome::NoParts);
    }

    let tables = parts
        .iter()
        .map(|path| read_table(path))
        .collect::<Result<Vec<_>>>()?;

    let merged = concat_tables(tables);
    write_table(&merged, output)?;

    info!(
        "Merged {} shards into {} ({} rows)",
        parts.len(),
        output.display(),
        merged.row_count()
    );

    Ok(MergeOutcome::Merged(MergeSummary {
        parts: parts.len(),
        rows: merged.row_count(),
        output: output.to_path_buf(),
    }))
}

/// Concatenate tables, preserving table order then row order.
///
/// The result has the union of all columns in first-seen order. A row from a
/// table lacking some column gets an empty field in that position.
pub fn concat_tables(tables: Vec<RawTable>) -> RawTable {
    let mut columns: Vec<String> = Vec::new();
    for table in &tables {
        for column in &table.columns {
            if !columns.contains(column) {
                columns.push(column.clone());
            }
        }
    }

    let total_rows = tables.iter().map(RawTable::row_count).sum();
    let mut records: Vec<StringRecord> = Vec::with_capacity(total_rows);

    for table in tables {
        if table.columns == columns {
            records.extend(table.records);
            continue;
        }

        debug!(
            "Shard columns {:?} differ from merged columns {:?}; realigning",
            table.columns, columns
        );
        let source_index: Vec<Option<usize>> =
            columns.iter().map(|c| table.column_index(c)).collect();
        for record in &table.records {
            let aligned: StringRecord = source_index
                .iter()
                .map(|idx| idx.and_then(|i| record.get(i)).unwrap_or(""))
                .collect();
            records.push(aligned);
        }
    }

    RawTable { columns, records }
}

/// Write `table` to `path` as CSV with a header row.
pub fn write_table(table: &RawTable, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|source| ResultsError::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = csv::Writer::from_writer(file);

    writer
        .write_record(&table.columns)
        .map_err(|e| ResultsError::csv(path, e))?;
    for record in &table.records {
        writer
            .write_record(record)
            .map_err(|e| ResultsError::csv(path, e))?;
    }
    writer.flush().map_err(|source| ResultsError::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
