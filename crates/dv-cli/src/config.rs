//! Configuration for the ingestion and validation stages.
//!
//! Every run writes under a timestamped artifact directory:
//!
//! ```text
//! <artifact_root>/<timestamp>/
//!   data_ingestion/feature_store/data.csv
//!   data_ingestion/ingested/{train,test}.csv
//!   data_validation/validated/{train,test}.csv
//!   data_validation/invalid/{train,test}.csv
//!   data_validation/drift_report/report.yaml
//! ```

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use dv_ingest::SplitOptions;
use dv_validate::DEFAULT_DRIFT_THRESHOLD;
use serde::{Deserialize, Serialize};

pub const PIPELINE_NAME: &str = "dataset-validation";
pub const ARTIFACT_DIR: &str = "Artifacts";
pub const SCHEMA_FILE_PATH: &str = "data_schema/schema.yaml";
pub const TIMESTAMP_FORMAT: &str = "%m_%d_%Y_%H_%M_%S";

pub const TRAIN_FILE_NAME: &str = "train.csv";
pub const TEST_FILE_NAME: &str = "test.csv";

pub const DATA_INGESTION_DIR_NAME: &str = "data_ingestion";
pub const FEATURE_STORE_DIR: &str = "feature_store";
pub const FEATURE_STORE_FILE_NAME: &str = "data.csv";
pub const INGESTED_DIR: &str = "ingested";

pub const DATA_VALIDATION_DIR_NAME: &str = "data_validation";
pub const VALID_DIR: &str = "validated";
pub const INVALID_DIR: &str = "invalid";
pub const DRIFT_REPORT_DIR: &str = "drift_report";
pub const DRIFT_REPORT_FILE_NAME: &str = "report.yaml";

/// What the validation stage does when a dataset fails its structural checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StructuralPolicy {
    /// Fail validation, skip drift detection, and quarantine failing splits.
    #[default]
    Halt,
    /// Log the findings and run drift detection anyway; status comes from
    /// drift alone and both splits are written as valid.
    Continue,
}

/// Root configuration shared by all stages of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingPipelineConfig {
    pub pipeline_name: String,
    pub timestamp: String,
    /// `<artifact_root>/<timestamp>`.
    pub artifact_dir: PathBuf,
}

impl TrainingPipelineConfig {
    /// Create a config whose artifact directory is stamped with the current time.
    pub fn new(artifact_root: &Path) -> Self {
        Self::with_timestamp(artifact_root, Local::now())
    }

    pub fn with_timestamp(artifact_root: &Path, timestamp: DateTime<Local>) -> Self {
        let timestamp = timestamp.format(TIMESTAMP_FORMAT).to_string();
        Self {
            pipeline_name: PIPELINE_NAME.to_string(),
            artifact_dir: artifact_root.join(&timestamp),
            timestamp,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DataIngestionConfig {
    /// Source CSV holding the full dataset.
    pub source_file_path: PathBuf,
    /// Copy of the source as loaded, kept for reproducibility.
    pub feature_store_file_path: PathBuf,
    pub training_file_path: PathBuf,
    pub testing_file_path: PathBuf,
    pub split: SplitOptions,
}

impl DataIngestionConfig {
    pub fn new(pipeline: &TrainingPipelineConfig, source_file_path: PathBuf) -> Self {
        let dir = pipeline.artifact_dir.join(DATA_INGESTION_DIR_NAME);
        Self {
            source_file_path,
            feature_store_file_path: dir.join(FEATURE_STORE_DIR).join(FEATURE_STORE_FILE_NAME),
            training_file_path: dir.join(INGESTED_DIR).join(TRAIN_FILE_NAME),
            testing_file_path: dir.join(INGESTED_DIR).join(TEST_FILE_NAME),
            split: SplitOptions::default(),
        }
    }

    #[must_use]
    pub fn with_split(mut self, split: SplitOptions) -> Self {
        self.split = split;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DataValidationConfig {
    pub schema_file_path: PathBuf,
    pub valid_train_file_path: PathBuf,
    pub valid_test_file_path: PathBuf,
    pub invalid_train_file_path: PathBuf,
    pub invalid_test_file_path: PathBuf,
    pub drift_report_file_path: PathBuf,
    /// KS p-value below which a column counts as drifted.
    pub drift_threshold: f64,
    pub structural_policy: StructuralPolicy,
}

impl DataValidationConfig {
    pub fn new(pipeline: &TrainingPipelineConfig, schema_file_path: PathBuf) -> Self {
        let dir = pipeline.artifact_dir.join(DATA_VALIDATION_DIR_NAME);
        Self {
            schema_file_path,
            valid_train_file_path: dir.join(VALID_DIR).join(TRAIN_FILE_NAME),
            valid_test_file_path: dir.join(VALID_DIR).join(TEST_FILE_NAME),
            invalid_train_file_path: dir.join(INVALID_DIR).join(TRAIN_FILE_NAME),
            invalid_test_file_path: dir.join(INVALID_DIR).join(TEST_FILE_NAME),
            drift_report_file_path: dir.join(DRIFT_REPORT_DIR).join(DRIFT_REPORT_FILE_NAME),
            drift_threshold: DEFAULT_DRIFT_THRESHOLD,
            structural_policy: StructuralPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.drift_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_structural_policy(mut self, policy: StructuralPolicy) -> Self {
        self.structural_policy = policy;
        self
    }
}
