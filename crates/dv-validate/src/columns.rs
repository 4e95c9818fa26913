//! Column-level schema conformance.
//!
//! Two checks, both pure with respect to the dataset:
//!
//! - **count**: the dataset has exactly as many columns as the schema declares
//!   (order and names are not compared).
//! - **numeric**: the dataset's columns are exactly the schema's numeric set,
//!   and every one of them has a numeric dtype. Columns the schema declares
//!   but does not mark numeric are not expected here.

use std::collections::BTreeSet;

use dv_model::{Schema, StructuralFinding};
use polars::prelude::{DataFrame, DataType};

/// True iff the dataset has as many columns as the schema.
pub fn validate_column_count(df: &DataFrame, schema: &Schema) -> bool {
    column_count_finding(df, schema).is_none()
}

/// True iff the dataset's columns are exactly the numeric set and all numeric.
pub fn validate_numeric_columns(df: &DataFrame, schema: &Schema) -> bool {
    numeric_column_findings(df, schema).is_empty()
}

pub fn column_count_finding(df: &DataFrame, schema: &Schema) -> Option<StructuralFinding> {
    let expected = schema.column_count();
    let actual = df.width();
    (expected != actual).then_some(StructuralFinding::ColumnCountMismatch { expected, actual })
}

/// Every numeric-conformance defect, in check order: unexpected columns,
/// missing columns, then non-numeric columns.
pub fn numeric_column_findings(df: &DataFrame, schema: &Schema) -> Vec<StructuralFinding> {
    let expected = schema.numerical_columns();
    let actual: BTreeSet<String> = df
        .get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect();

    let mut findings = Vec::new();

    let unexpected: Vec<String> = actual.difference(expected).cloned().collect();
    if !unexpected.is_empty() {
        findings.push(StructuralFinding::UnexpectedColumns {
            columns: unexpected,
        });
    }

    let missing: Vec<String> = expected.difference(&actual).cloned().collect();
    if !missing.is_empty() {
        findings.push(StructuralFinding::MissingColumns { columns: missing });
    }

    for name in expected.intersection(&actual) {
        let Ok(column) = df.column(name) else {
            continue;
        };
        let dtype = column.dtype();
        if !is_numeric_dtype(dtype) {
            findings.push(StructuralFinding::NonNumericColumn {
                column: name.clone(),
                dtype: dtype.to_string(),
            });
        }
    }

    findings
}

/// Integer and floating point dtypes count as numeric.
pub(crate) fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}
