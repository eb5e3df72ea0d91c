use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the result tools.
#[derive(Error, Debug)]
pub enum ResultsError {
    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file could not be created or written.
    #[error("Failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A CSV document could not be parsed or written.
    #[error("CSV error in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A table file has no header row at all.
    #[error("No columns to parse in {0}")]
    EmptyTable(PathBuf),

    /// A column the caller depends on is absent from the header row.
    #[error("Missing required column '{column}' in {path}")]
    MissingColumn { path: PathBuf, column: String },

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ResultsError {
    /// Wrap a [`csv::Error`] together with the file it came from.
    pub fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        ResultsError::Csv {
            path: path.into(),
            source,
        }
    }
}

/// Convenience alias used throughout the result crates.
pub type Result<T> = std::result::Result<T, ResultsError>;
