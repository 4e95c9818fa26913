//! Data model for dataset validation.
//!
//! Shared by the ingestion, validation, reporting, and CLI crates.

pub mod artifact;
pub mod error;
pub mod report;
pub mod schema;
pub mod split;
pub mod structural;

pub use artifact::{IngestionArtifact, ValidationArtifact};
pub use error::SchemaError;
pub use report::{ColumnDrift, DriftReport};
pub use schema::{ColumnSpec, Schema};
pub use split::DatasetSplit;
pub use structural::{StructuralFinding, StructuralReport};
