//! Distribution drift between a baseline and a current dataset.

use std::collections::BTreeMap;

use dv_model::{ColumnDrift, DriftReport};
use polars::prelude::{Column, DataFrame, DataType};
use tracing::{debug, info, warn};

use crate::columns::is_numeric_dtype;
use crate::error::{Result, ValidationError};
use crate::ks::ks_2samp;

/// Significance level below which a column is flagged as drifted.
pub const DEFAULT_DRIFT_THRESHOLD: f64 = 0.05;

const BASELINE: &str = "baseline";
const CURRENT: &str = "current";

/// Compares every baseline column against the same column in `current`.
///
/// A column drifts when its KS p-value is below `threshold`. The returned
/// status is true only if no column drifted. Columns that exist only in
/// `current` are ignored.
///
/// # Errors
///
/// Fails when the threshold is outside (0, 1), a baseline column is missing
/// from `current`, a compared column is not numeric, or either side of a
/// column has no non-null values.
pub fn detect_drift(
    baseline: &DataFrame,
    current: &DataFrame,
    threshold: f64,
) -> Result<(bool, DriftReport)> {
    if !(threshold > 0.0 && threshold < 1.0) {
        return Err(ValidationError::InvalidThreshold { threshold });
    }

    let mut status = true;
    let mut columns = BTreeMap::new();

    for base_column in baseline.get_columns() {
        let name = base_column.name().as_str();
        let current_column =
            current
                .column(name)
                .map_err(|_| ValidationError::MissingColumn {
                    column: name.to_string(),
                })?;

        let base_values = numeric_values(base_column, BASELINE)?;
        let current_values = numeric_values(current_column, CURRENT)?;
        let Some(result) = ks_2samp(&base_values, &current_values) else {
            // numeric_values never returns an empty sample
            continue;
        };

        let drift_detected = result.p_value < threshold;
        if drift_detected {
            status = false;
            warn!(
                column = name,
                statistic = result.statistic,
                p_value = result.p_value,
                threshold,
                "drift detected"
            );
        } else {
            debug!(
                column = name,
                statistic = result.statistic,
                p_value = result.p_value,
                "no drift"
            );
        }
        columns.insert(
            name.to_string(),
            ColumnDrift {
                p_value: result.p_value,
                drift_detected,
            },
        );
    }

    let report = DriftReport::from_columns(columns);
    info!(
        columns = report.len(),
        drifted = report.drifted_columns().len(),
        threshold,
        status,
        "drift detection complete"
    );
    Ok((status, report))
}

/// Non-null, non-NaN values of a numeric column as `f64`.
fn numeric_values(column: &Column, dataset: &'static str) -> Result<Vec<f64>> {
    let dtype = column.dtype();
    if !is_numeric_dtype(dtype) {
        return Err(ValidationError::NonNumericColumn {
            column: column.name().to_string(),
            dataset,
            dtype: dtype.to_string(),
        });
    }

    let series = column.as_materialized_series().cast(&DataType::Float64)?;
    let values: Vec<f64> = series
        .f64()?
        .into_iter()
        .flatten()
        .filter(|value| !value.is_nan())
        .collect();

    if values.is_empty() {
        return Err(ValidationError::EmptyColumn {
            column: column.name().to_string(),
            dataset,
        });
    }
    Ok(values)
}
