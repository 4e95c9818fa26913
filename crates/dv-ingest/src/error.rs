//! Error types for dataset ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading datasets and schema files.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === CSV Errors ===
    /// Failed to parse CSV.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// CSV file has no header row.
    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    /// Header row contains a blank column name.
    #[error("CSV header in {path} contains an empty column name at position {position}")]
    EmptyColumnName { path: PathBuf, position: usize },

    /// Header row repeats a column name.
    #[error("CSV header in {path} repeats column '{column}'")]
    DuplicateColumn { path: PathBuf, column: String },

    // === Schema Errors ===
    /// Schema file could not be parsed or failed its consistency checks.
    #[error("invalid schema file {path}: {message}")]
    SchemaParse { path: PathBuf, message: String },

    // === Split Errors ===
    /// Split ratio outside (0, 1).
    #[error("train/test split ratio must be between 0 and 1 (exclusive), got {ratio}")]
    InvalidSplitRatio { ratio: f64 },

    /// Dataset too small to yield two non-empty splits.
    #[error("dataset with {rows} rows cannot be split with test ratio {ratio}")]
    SplitTooSmall { rows: usize, ratio: f64 },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl IngestError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound { path }
        } else {
            Self::FileRead { path, source }
        }
    }
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
