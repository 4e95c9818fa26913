use std::path::{Path, PathBuf};

use anyhow::Result;
use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde::Serialize;

use dv_model::{DriftReport, IngestionArtifact, StructuralReport, ValidationArtifact};

use crate::cli::OutputArg;
use crate::types::RunResult;

/// Machine-readable view of a run, printed with `--output json`.
#[derive(Serialize)]
struct JsonSummary<'a> {
    artifact_dir: &'a Path,
    #[serde(skip_serializing_if = "Option::is_none")]
    data_ingestion: Option<&'a IngestionArtifact>,
    data_validation: &'a ValidationArtifact,
    structural: &'a [StructuralReport],
    #[serde(skip_serializing_if = "Option::is_none")]
    drift_report: Option<&'a DriftReport>,
}

pub fn print_summary(result: &RunResult, output: OutputArg) -> Result<()> {
    match output {
        OutputArg::Json => {
            let summary = JsonSummary {
                artifact_dir: &result.artifact_dir,
                data_ingestion: result.ingestion.as_ref(),
                data_validation: &result.outcome.artifact,
                structural: &result.outcome.structural,
                drift_report: result.outcome.drift_report.as_ref(),
            };
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        OutputArg::Text => print_text_summary(result),
    }
    Ok(())
}

fn print_text_summary(result: &RunResult) {
    let artifact = &result.outcome.artifact;
    println!("Artifacts: {}", result.artifact_dir.display());
    if let Some(ingestion) = &result.ingestion {
        println!("Ingested train: {}", ingestion.trained_file_path.display());
        println!("Ingested test: {}", ingestion.test_file_path.display());
    }
    print_path("Valid train", artifact.valid_train_file_path.as_ref());
    print_path("Valid test", artifact.valid_test_file_path.as_ref());
    print_path("Invalid train", artifact.invalid_train_file_path.as_ref());
    print_path("Invalid test", artifact.invalid_test_file_path.as_ref());
    print_path("Drift report", artifact.drift_report_file_path.as_ref());

    if let Some(report) = &result.outcome.drift_report {
        println!("{}", drift_table(report));
    }

    let messages = result.outcome.structural_messages();
    if !messages.is_empty() {
        eprintln!("Structural findings:");
        for message in &messages {
            eprintln!("- {message}");
        }
    }

    if artifact.validation_status {
        println!("Validation status: passed");
    } else {
        println!("Validation status: FAILED");
    }
}

fn print_path(label: &str, path: Option<&PathBuf>) {
    if let Some(path) = path {
        println!("{label}: {}", path.display());
    }
}

fn drift_table(report: &DriftReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("p-value"),
        header_cell("Drift"),
    ]);
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Center);
    for (column, drift) in report.iter() {
        table.add_row(vec![
            Cell::new(column),
            Cell::new(format!("{:.4e}", drift.p_value)),
            drift_cell(drift.drift_detected),
        ]);
    }
    table
}

fn drift_cell(drift_detected: bool) -> Cell {
    if drift_detected {
        Cell::new("yes")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold)
    } else {
        Cell::new("no").fg(Color::DarkGrey)
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}
