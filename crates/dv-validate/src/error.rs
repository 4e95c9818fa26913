//! Error types for drift detection.

use thiserror::Error;

/// Failures that stop drift detection for a dataset pair.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("drift threshold must be between 0 and 1 (exclusive), got {threshold}")]
    InvalidThreshold { threshold: f64 },

    #[error("baseline column '{column}' is missing from the current dataset")]
    MissingColumn { column: String },

    #[error("column '{column}' in the {dataset} dataset is not numeric (found {dtype})")]
    NonNumericColumn {
        column: String,
        dataset: &'static str,
        dtype: String,
    },

    #[error("column '{column}' in the {dataset} dataset has no non-null values")]
    EmptyColumn {
        column: String,
        dataset: &'static str,
    },

    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for ValidationError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ValidationError>;
