//! Drift report files.

use std::path::Path;

use dv_model::DriftReport;
use tracing::info;

use crate::error::Result;
use crate::yaml::{read_yaml_file, write_yaml_file};

/// Writes the report as a YAML mapping of column to `{p_value, drift_detected}`.
pub fn write_drift_report(path: &Path, report: &DriftReport) -> Result<()> {
    write_yaml_file(path, report)?;
    info!(
        path = %path.display(),
        columns = report.len(),
        "drift report written"
    );
    Ok(())
}

pub fn read_drift_report(path: &Path) -> Result<DriftReport> {
    read_yaml_file(path)
}
