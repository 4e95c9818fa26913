//! Pipeline components for the dataset validator.
//!
//! The `dv` binary wires these together; tests drive them directly.

pub mod config;
pub mod error;
pub mod logging;
pub mod pipeline;

pub use config::{
    DataIngestionConfig, DataValidationConfig, StructuralPolicy, TrainingPipelineConfig,
};
pub use error::{PipelineError, Stage};
pub use pipeline::{DataIngestion, DataValidation, ValidationOutcome};
