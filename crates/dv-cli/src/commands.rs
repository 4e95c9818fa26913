use anyhow::{Context, Result};
use dv_ingest::SplitOptions;
use dv_model::IngestionArtifact;
use tracing::{info, info_span};

use dv_cli::config::{DataIngestionConfig, DataValidationConfig, TrainingPipelineConfig};
use dv_cli::pipeline::{DataIngestion, DataValidation};

use crate::cli::{CommonArgs, RunArgs, ValidateArgs};
use crate::types::RunResult;

/// Ingest the source file, then validate the resulting split.
pub fn run_full(args: &RunArgs) -> Result<RunResult> {
    let pipeline = TrainingPipelineConfig::new(&args.common.artifact_dir);
    let run_span = info_span!("run", timestamp = %pipeline.timestamp);
    let _run_guard = run_span.enter();
    info!(artifact_dir = %pipeline.artifact_dir.display(), "starting pipeline");

    let ingestion_config = DataIngestionConfig::new(&pipeline, args.source.clone())
        .with_split(SplitOptions {
            test_ratio: args.test_ratio,
            seed: args.seed,
        });
    let ingestion = DataIngestion::new(ingestion_config)
        .run()
        .context("data ingestion")?;

    let config = validation_config(&pipeline, &args.common);
    let validation =
        DataValidation::new(ingestion.clone(), config).context("data validation")?;
    let outcome = validation.run().context("data validation")?;

    Ok(RunResult {
        artifact_dir: pipeline.artifact_dir,
        ingestion: Some(ingestion),
        outcome,
    })
}

/// Validate an existing train/test pair.
pub fn run_validate(args: &ValidateArgs) -> Result<RunResult> {
    let pipeline = TrainingPipelineConfig::new(&args.common.artifact_dir);
    let run_span = info_span!("validate", timestamp = %pipeline.timestamp);
    let _run_guard = run_span.enter();
    info!(artifact_dir = %pipeline.artifact_dir.display(), "starting validation");

    let ingestion = IngestionArtifact {
        trained_file_path: args.train.clone(),
        test_file_path: args.test.clone(),
    };
    let config = validation_config(&pipeline, &args.common);
    let validation = DataValidation::new(ingestion, config).context("data validation")?;
    let outcome = validation.run().context("data validation")?;

    Ok(RunResult {
        artifact_dir: pipeline.artifact_dir,
        ingestion: None,
        outcome,
    })
}

fn validation_config(
    pipeline: &TrainingPipelineConfig,
    common: &CommonArgs,
) -> DataValidationConfig {
    DataValidationConfig::new(pipeline, common.schema.clone())
        .with_threshold(common.threshold)
        .with_structural_policy(common.on_structural_failure.into())
}
