//! End-to-end tests for the ingestion and validation stages.

use std::fs;
use std::path::{Path, PathBuf};

use dv_cli::config::{
    DataIngestionConfig, DataValidationConfig, StructuralPolicy, TrainingPipelineConfig,
};
use dv_cli::error::Stage;
use dv_cli::pipeline::{DataIngestion, DataValidation};
use dv_ingest::{SplitOptions, read_dataset};
use dv_model::{DriftReport, IngestionArtifact, StructuralFinding};
use dv_report::read_drift_report;
use tempfile::TempDir;

const SCHEMA: &str = "columns:\n  - a: int64\n  - b: int64\n  - c: int64\n\
                      numerical_columns:\n  - a\n  - b\n  - c\n";

fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("write fixture");
    path
}

/// `rows` rows of columns a, b, c, plus any `extra` header/value pair.
fn numeric_csv(rows: usize, extra: Option<(&str, &str)>) -> String {
    let mut csv = String::from("a,b,c");
    if let Some((name, _)) = extra {
        csv.push(',');
        csv.push_str(name);
    }
    csv.push('\n');
    for i in 0..rows {
        csv.push_str(&format!("{},{},{}", i, i * 2, i % 5));
        if let Some((_, value)) = extra {
            csv.push(',');
            csv.push_str(value);
        }
        csv.push('\n');
    }
    csv
}

struct Fixture {
    dir: TempDir,
    pipeline: TrainingPipelineConfig,
    schema: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let schema = write_file(dir.path(), "schema.yaml", SCHEMA);
        let pipeline = TrainingPipelineConfig::new(&dir.path().join("Artifacts"));
        Self {
            dir,
            pipeline,
            schema,
        }
    }

    fn ingestion(&self, train: &str, test: &str) -> IngestionArtifact {
        IngestionArtifact {
            trained_file_path: write_file(self.dir.path(), "train.csv", train),
            test_file_path: write_file(self.dir.path(), "test.csv", test),
        }
    }

    fn config(&self, policy: StructuralPolicy) -> DataValidationConfig {
        DataValidationConfig::new(&self.pipeline, self.schema.clone())
            .with_structural_policy(policy)
    }
}

#[test]
fn clean_datasets_pass_validation() {
    let fixture = Fixture::new();
    let ingestion = fixture.ingestion(&numeric_csv(20, None), &numeric_csv(20, None));
    let config = fixture.config(StructuralPolicy::Halt);

    let outcome = DataValidation::new(ingestion, config.clone())
        .expect("load schema")
        .run()
        .expect("validation runs");
    let artifact = &outcome.artifact;

    assert!(artifact.validation_status);
    assert!(outcome.structurally_valid());
    assert_eq!(artifact.valid_train_file_path.as_ref(), Some(&config.valid_train_file_path));
    assert_eq!(artifact.valid_test_file_path.as_ref(), Some(&config.valid_test_file_path));
    assert!(artifact.invalid_train_file_path.is_none());
    assert!(artifact.invalid_test_file_path.is_none());
    assert_eq!(read_dataset(&config.valid_train_file_path).unwrap().height(), 20);

    let report_path = artifact.drift_report_file_path.as_ref().expect("drift ran");
    let report = read_drift_report(report_path).expect("read report");
    assert_eq!(report.len(), 3);
    for (column, drift) in report.iter() {
        assert!(!drift.drift_detected, "column {column} drifted");
        assert!(drift.p_value > 0.99);
    }
}

#[test]
fn halt_policy_quarantines_failing_split() {
    let fixture = Fixture::new();
    let test = numeric_csv(20, None).replacen("\n0,0,0\n", "\n0,0,x\n", 1);
    let ingestion = fixture.ingestion(&numeric_csv(20, None), &test);
    let config = fixture.config(StructuralPolicy::Halt);

    let outcome = DataValidation::new(ingestion, config.clone())
        .unwrap()
        .run()
        .unwrap();
    let artifact = &outcome.artifact;

    assert!(!artifact.validation_status);
    assert!(!outcome.structurally_valid());
    assert!(outcome.structural[0].passed());
    assert!(matches!(
        outcome.structural[1].findings.as_slice(),
        [StructuralFinding::NonNumericColumn { column, .. }] if column == "c"
    ));
    assert_eq!(artifact.valid_train_file_path.as_ref(), Some(&config.valid_train_file_path));
    assert_eq!(artifact.invalid_test_file_path.as_ref(), Some(&config.invalid_test_file_path));
    assert!(artifact.valid_test_file_path.is_none());
    assert!(artifact.drift_report_file_path.is_none());
    assert!(outcome.drift_report.is_none());
    assert!(config.invalid_test_file_path.exists());
    assert!(!config.drift_report_file_path.exists());
}

#[test]
fn continue_policy_runs_drift_despite_findings() {
    let fixture = Fixture::new();
    let test = numeric_csv(20, Some(("d", "1")));
    let ingestion = fixture.ingestion(&numeric_csv(20, None), &test);
    let config = fixture.config(StructuralPolicy::Continue);

    let outcome = DataValidation::new(ingestion, config.clone())
        .unwrap()
        .run()
        .unwrap();
    let artifact = &outcome.artifact;

    assert!(!outcome.structurally_valid());
    assert_eq!(
        outcome.structural_messages(),
        vec![
            "test dataset: expected 3 columns, found 4".to_string(),
            "test dataset: unexpected non-numerical columns: d".to_string(),
        ]
    );
    // Status comes from drift alone; the extra test column is not compared
    assert!(artifact.validation_status);
    assert_eq!(outcome.drift_report.as_ref().map(DriftReport::len), Some(3));
    assert!(artifact.valid_test_file_path.is_some());
    assert!(artifact.invalid_test_file_path.is_none());
    assert!(config.drift_report_file_path.exists());
}

#[test]
fn continue_policy_surfaces_drift_errors() {
    let fixture = Fixture::new();
    let test = numeric_csv(20, None).replacen("\n0,0,0\n", "\n0,0,x\n", 1);
    let ingestion = fixture.ingestion(&numeric_csv(20, None), &test);

    let err = DataValidation::new(ingestion, fixture.config(StructuralPolicy::Continue))
        .unwrap()
        .run()
        .unwrap_err();

    assert_eq!(err.stage, Stage::DriftCheck);
    assert!(err.to_string().contains("'c'"), "{err}");
}

#[test]
fn missing_schema_fails_at_schema_load() {
    let fixture = Fixture::new();
    let ingestion = fixture.ingestion(&numeric_csv(5, None), &numeric_csv(5, None));
    let schema = fixture.dir.path().join("nope.yaml");
    let config = DataValidationConfig::new(&fixture.pipeline, schema);

    let err = DataValidation::new(ingestion, config).unwrap_err();

    assert_eq!(err.stage, Stage::SchemaLoad);
}

#[test]
fn missing_dataset_fails_at_load() {
    let fixture = Fixture::new();
    let ingestion = IngestionArtifact {
        trained_file_path: fixture.dir.path().join("missing.csv"),
        test_file_path: fixture.dir.path().join("missing.csv"),
    };

    let err = DataValidation::new(ingestion, fixture.config(StructuralPolicy::Halt))
        .unwrap()
        .run()
        .unwrap_err();

    assert_eq!(err.stage, Stage::Load);
}

#[test]
fn ingestion_writes_feature_store_and_split() {
    let fixture = Fixture::new();
    let source = write_file(fixture.dir.path(), "source.csv", &numeric_csv(10, None));
    let config = DataIngestionConfig::new(&fixture.pipeline, source).with_split(SplitOptions {
        test_ratio: 0.2,
        seed: 7,
    });

    let artifact = DataIngestion::new(config.clone()).run().expect("ingest");

    assert_eq!(artifact.trained_file_path, config.training_file_path);
    assert_eq!(artifact.test_file_path, config.testing_file_path);
    assert_eq!(read_dataset(&config.feature_store_file_path).unwrap().height(), 10);
    assert_eq!(read_dataset(&artifact.trained_file_path).unwrap().height(), 8);
    assert_eq!(read_dataset(&artifact.test_file_path).unwrap().height(), 2);
}

#[test]
fn ingestion_then_validation() {
    let fixture = Fixture::new();
    let source = write_file(fixture.dir.path(), "source.csv", &numeric_csv(50, None));
    let ingestion_config = DataIngestionConfig::new(&fixture.pipeline, source);

    let ingestion = DataIngestion::new(ingestion_config).run().unwrap();
    let outcome = DataValidation::new(ingestion, fixture.config(StructuralPolicy::Halt))
        .unwrap()
        .run()
        .unwrap();

    assert!(outcome.structurally_valid());
    let report = outcome.drift_report.expect("drift ran");
    assert_eq!(report.len(), 3);
    assert_eq!(outcome.artifact.validation_status, report.is_stable());
}
