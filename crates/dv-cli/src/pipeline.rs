//! Ingestion and validation stages.
//!
//! The validation stage runs these steps in order:
//! 1. **Load**: read the train and test CSV files
//! 2. **Count check**: compare each dataset's width with the schema
//! 3. **Type check**: compare each dataset's columns with the numeric set
//! 4. **Drift check**: KS test every train column against test, write the report
//! 5. **Persist**: write the datasets to their valid or invalid locations
//!
//! Any failure ends the run with a [`PipelineError`] tagged with its stage.

use std::path::{Path, PathBuf};
use std::time::Instant;

use dv_ingest::{load_schema, read_dataset, train_test_split};
use dv_model::{
    DatasetSplit, DriftReport, IngestionArtifact, Schema, StructuralReport, ValidationArtifact,
};
use dv_report::{write_dataset, write_drift_report};
use dv_validate::{column_count_finding, detect_drift, numeric_column_findings};
use polars::prelude::DataFrame;
use tracing::{debug, info, info_span, warn};

use crate::config::{DataIngestionConfig, DataValidationConfig, StructuralPolicy};
use crate::error::{PipelineError, Result, Stage};

// ============================================================================
// Ingestion
// ============================================================================

/// Splits a source CSV into train and test files.
#[derive(Debug, Clone)]
pub struct DataIngestion {
    config: DataIngestionConfig,
}

impl DataIngestion {
    pub fn new(config: DataIngestionConfig) -> Self {
        Self { config }
    }

    /// Reads the source file, keeps a feature-store copy, and writes the
    /// shuffled train/test split.
    pub fn run(&self) -> Result<IngestionArtifact> {
        let span = info_span!(
            "data_ingestion",
            source = %self.config.source_file_path.display()
        );
        let _guard = span.enter();
        let start = Instant::now();

        let ingest_span = info_span!("stage", stage = %Stage::Ingest);
        let artifact = ingest_span.in_scope(|| -> Result<IngestionArtifact> {
            let source = read_dataset(&self.config.source_file_path)
                .map_err(PipelineError::at(Stage::Ingest))?;
            write_dataset(&self.config.feature_store_file_path, &source)
                .map_err(PipelineError::at(Stage::Ingest))?;

            let (train, test) = train_test_split(&source, self.config.split)
                .map_err(PipelineError::at(Stage::Ingest))?;
            write_dataset(&self.config.training_file_path, &train)
                .map_err(PipelineError::at(Stage::Ingest))?;
            write_dataset(&self.config.testing_file_path, &test)
                .map_err(PipelineError::at(Stage::Ingest))?;

            Ok(IngestionArtifact {
                trained_file_path: self.config.training_file_path.clone(),
                test_file_path: self.config.testing_file_path.clone(),
            })
        })?;

        info!(
            train = %artifact.trained_file_path.display(),
            test = %artifact.test_file_path.display(),
            duration_ms = start.elapsed().as_millis(),
            "data ingestion complete"
        );
        Ok(artifact)
    }
}

// ============================================================================
// Validation
// ============================================================================

/// Everything a validation run produced.
#[derive(Debug, Clone)]
pub struct ValidationOutcome {
    pub artifact: ValidationArtifact,
    /// Structural findings for the train and test splits, in that order.
    pub structural: Vec<StructuralReport>,
    /// `None` when drift detection was skipped.
    pub drift_report: Option<DriftReport>,
}

impl ValidationOutcome {
    pub fn structurally_valid(&self) -> bool {
        self.structural.iter().all(StructuralReport::passed)
    }

    pub fn structural_messages(&self) -> Vec<String> {
        self.structural
            .iter()
            .flat_map(StructuralReport::messages)
            .collect()
    }
}

/// Validates the train/test pair from an ingestion run against a schema.
#[derive(Debug, Clone)]
pub struct DataValidation {
    ingestion: IngestionArtifact,
    config: DataValidationConfig,
    schema: Schema,
}

impl DataValidation {
    /// Loads the schema file named in `config`. A missing or malformed schema
    /// fails construction.
    pub fn new(ingestion: IngestionArtifact, config: DataValidationConfig) -> Result<Self> {
        let schema = load_schema(&config.schema_file_path)
            .map_err(PipelineError::at(Stage::SchemaLoad))?;
        Ok(Self::with_schema(ingestion, config, schema))
    }

    pub fn with_schema(
        ingestion: IngestionArtifact,
        config: DataValidationConfig,
        schema: Schema,
    ) -> Self {
        Self {
            ingestion,
            config,
            schema,
        }
    }

    pub fn run(&self) -> Result<ValidationOutcome> {
        let span = info_span!(
            "data_validation",
            train = %self.ingestion.trained_file_path.display(),
            test = %self.ingestion.test_file_path.display()
        );
        let _guard = span.enter();
        let start = Instant::now();
        let policy = self.config.structural_policy;

        // Stage: load
        let load_span = info_span!("stage", stage = %Stage::Load);
        let (train, test) = load_span.in_scope(|| -> Result<_> {
            let train = read_dataset(&self.ingestion.trained_file_path)
                .map_err(PipelineError::at(Stage::Load))?;
            let test = read_dataset(&self.ingestion.test_file_path)
                .map_err(PipelineError::at(Stage::Load))?;
            Ok((train, test))
        })?;

        // Stage: column count
        let mut train_report = StructuralReport::new(DatasetSplit::Train);
        let mut test_report = StructuralReport::new(DatasetSplit::Test);
        info_span!("stage", stage = %Stage::CountCheck).in_scope(|| {
            debug!(
                columns = %self.schema.column_names().collect::<Vec<_>>().join(","),
                "schema columns"
            );
            for (df, report) in [(&train, &mut train_report), (&test, &mut test_report)] {
                debug!(
                    split = %report.split,
                    required_columns = self.schema.column_count(),
                    actual_columns = df.width(),
                    "checking column count"
                );
                if let Some(finding) = column_count_finding(df, &self.schema) {
                    report.add(finding);
                }
            }
        });

        // Stage: numeric types
        info_span!("stage", stage = %Stage::TypeCheck).in_scope(|| {
            for (df, report) in [(&train, &mut train_report), (&test, &mut test_report)] {
                for finding in numeric_column_findings(df, &self.schema) {
                    report.add(finding);
                }
            }
        });

        let structurally_valid = train_report.passed() && test_report.passed();
        for message in train_report
            .messages()
            .into_iter()
            .chain(test_report.messages())
        {
            warn!("{message}");
        }

        // Stage: drift
        let run_drift = structurally_valid || policy == StructuralPolicy::Continue;
        let drift = if run_drift {
            let drift_span = info_span!("stage", stage = %Stage::DriftCheck);
            let (status, report) = drift_span.in_scope(|| -> Result<_> {
                let (status, report) =
                    detect_drift(&train, &test, self.config.drift_threshold)
                        .map_err(PipelineError::at(Stage::DriftCheck))?;
                write_drift_report(&self.config.drift_report_file_path, &report)
                    .map_err(PipelineError::at(Stage::DriftCheck))?;
                Ok((status, report))
            })?;
            Some((status, report))
        } else {
            warn!("structural checks failed, skipping drift detection");
            None
        };

        // Stage: persist
        let quarantine = policy == StructuralPolicy::Halt;
        let persist_span = info_span!("stage", stage = %Stage::Persist);
        let ((valid_train, invalid_train), (valid_test, invalid_test)) =
            persist_span.in_scope(|| -> Result<_> {
                let train_paths = persist_split(
                    &train,
                    !quarantine || train_report.passed(),
                    &self.config.valid_train_file_path,
                    &self.config.invalid_train_file_path,
                )?;
                let test_paths = persist_split(
                    &test,
                    !quarantine || test_report.passed(),
                    &self.config.valid_test_file_path,
                    &self.config.invalid_test_file_path,
                )?;
                Ok((train_paths, test_paths))
            })?;

        let validation_status = drift.as_ref().is_some_and(|(status, _)| *status);
        let artifact = ValidationArtifact {
            validation_status,
            valid_train_file_path: valid_train,
            valid_test_file_path: valid_test,
            invalid_train_file_path: invalid_train,
            invalid_test_file_path: invalid_test,
            drift_report_file_path: drift
                .as_ref()
                .map(|_| self.config.drift_report_file_path.clone()),
        };

        info!(
            stage = %Stage::Done,
            validation_status,
            structurally_valid,
            duration_ms = start.elapsed().as_millis(),
            "data validation complete"
        );
        Ok(ValidationOutcome {
            artifact,
            structural: vec![train_report, test_report],
            drift_report: drift.map(|(_, report)| report),
        })
    }
}

/// Writes a split to its valid or invalid location and returns the
/// `(valid, invalid)` path pair with exactly one side set.
fn persist_split(
    df: &DataFrame,
    valid: bool,
    valid_path: &Path,
    invalid_path: &Path,
) -> Result<(Option<PathBuf>, Option<PathBuf>)> {
    let path = if valid { valid_path } else { invalid_path };
    write_dataset(path, df).map_err(PipelineError::at(Stage::Persist))?;
    if valid {
        Ok((Some(path.to_path_buf()), None))
    } else {
        Ok((None, Some(path.to_path_buf())))
    }
}
