use std::path::PathBuf;

use dv_cli::ValidationOutcome;
use dv_model::IngestionArtifact;

#[derive(Debug)]
pub struct RunResult {
    /// Timestamped directory holding this run's outputs.
    pub artifact_dir: PathBuf,
    /// Set only when the run started from a source file.
    pub ingestion: Option<IngestionArtifact>,
    pub outcome: ValidationOutcome,
}

impl RunResult {
    pub fn validation_status(&self) -> bool {
        self.outcome.artifact.validation_status
    }
}
