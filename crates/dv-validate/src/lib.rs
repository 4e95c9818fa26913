//! Dataset validation.
//!
//! - [`columns`]: column count and numeric-type conformance against a schema
//! - [`detect_drift`]: per-column two-sample KS drift between baseline and
//!   current datasets

pub mod columns;
mod drift;
mod error;
pub mod ks;

pub use columns::{
    column_count_finding, numeric_column_findings, validate_column_count,
    validate_numeric_columns,
};
pub use drift::{DEFAULT_DRIFT_THRESHOLD, detect_drift};
pub use error::{Result, ValidationError};
pub use ks::{KsResult, ks_2samp};
