use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Output of the ingestion stage: where the train and test splits live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestionArtifact {
    pub trained_file_path: PathBuf,
    pub test_file_path: PathBuf,
}

/// Output of the validation stage, consumed read-only by later stages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationArtifact {
    pub validation_status: bool,
    pub valid_train_file_path: Option<PathBuf>,
    pub valid_test_file_path: Option<PathBuf>,
    pub invalid_train_file_path: Option<PathBuf>,
    pub invalid_test_file_path: Option<PathBuf>,
    /// `None` when drift detection was skipped after a structural failure.
    pub drift_report_file_path: Option<PathBuf>,
}
