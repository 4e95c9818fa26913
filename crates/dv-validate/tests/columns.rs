//! Column conformance tests.

use dv_model::{ColumnSpec, Schema, StructuralFinding};
use dv_validate::{
    numeric_column_findings, validate_column_count, validate_numeric_columns,
};
use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};
use proptest::prelude::*;

fn schema(columns: &[&str], numeric: &[&str]) -> Schema {
    Schema::new(
        columns
            .iter()
            .map(|name| ColumnSpec {
                name: (*name).to_string(),
                dtype: "float64".to_string(),
            })
            .collect(),
        numeric.iter().copied(),
    )
    .unwrap()
}

fn float_frame(names: &[&str]) -> DataFrame {
    let columns: Vec<Column> = names
        .iter()
        .map(|name| Series::new((*name).into(), vec![1.0, 2.5, 3.0]).into_column())
        .collect();
    DataFrame::new(columns).unwrap()
}

fn with_string_column(mut names: Vec<&str>, text_column: &str) -> DataFrame {
    names.retain(|name| *name != text_column);
    let mut columns: Vec<Column> = names
        .iter()
        .map(|name| Series::new((*name).into(), vec![1.0, 2.5, 3.0]).into_column())
        .collect();
    columns.push(Series::new(text_column.into(), vec!["1.0", "oops", "3.0"]).into_column());
    DataFrame::new(columns).unwrap()
}

#[test]
fn column_count_matches() {
    let schema = schema(&["a", "b", "c"], &["a", "b", "c"]);
    assert!(validate_column_count(&float_frame(&["a", "b", "c"]), &schema));
}

#[test]
fn column_count_ignores_names_and_order() {
    let schema = schema(&["a", "b", "c"], &["a", "b", "c"]);
    assert!(validate_column_count(&float_frame(&["z", "y", "x"]), &schema));
}

#[test]
fn column_count_flips_on_add_or_remove() {
    let schema = schema(&["a", "b", "c"], &["a", "b", "c"]);
    assert!(!validate_column_count(&float_frame(&["a", "b"]), &schema));
    assert!(!validate_column_count(&float_frame(&["a", "b", "c", "d"]), &schema));
}

#[test]
fn exact_numeric_set_passes() {
    let schema = schema(&["a", "b", "c"], &["a", "b", "c"]);
    assert!(validate_numeric_columns(&float_frame(&["c", "a", "b"]), &schema));
}

#[test]
fn numeric_subset_of_wider_schema_passes() {
    let schema = schema(&["a", "b", "label"], &["a", "b"]);
    let df = float_frame(&["a", "b"]);
    assert!(validate_numeric_columns(&df, &schema));
    assert!(!validate_column_count(&df, &schema));
}

#[test]
fn non_numeric_value_flips_result() {
    let schema = schema(&["a", "b", "c"], &["a", "b", "c"]);
    let df = with_string_column(vec!["a", "b", "c"], "b");
    assert!(!validate_numeric_columns(&df, &schema));
    let findings = numeric_column_findings(&df, &schema);
    assert!(matches!(
        findings.as_slice(),
        [StructuralFinding::NonNumericColumn { column, .. }] if column == "b"
    ));
}

#[test]
fn missing_numeric_column_flips_result() {
    let schema = schema(&["a", "b", "c"], &["a", "b", "c"]);
    let df = float_frame(&["a", "b"]);
    assert!(!validate_numeric_columns(&df, &schema));
    assert_eq!(
        numeric_column_findings(&df, &schema),
        vec![StructuralFinding::MissingColumns {
            columns: vec!["c".to_string()],
        }]
    );
}

#[test]
fn extra_column_flips_result() {
    let schema = schema(&["a", "b", "c"], &["a", "b", "c"]);
    let df = float_frame(&["a", "b", "c", "extra"]);
    assert!(!validate_numeric_columns(&df, &schema));
    assert_eq!(
        numeric_column_findings(&df, &schema),
        vec![StructuralFinding::UnexpectedColumns {
            columns: vec!["extra".to_string()],
        }]
    );
}

#[test]
fn all_findings_are_collected() {
    let schema = schema(&["a", "b", "c"], &["a", "b", "c"]);
    let df = with_string_column(vec!["a", "extra"], "b");
    let findings = numeric_column_findings(&df, &schema);
    assert_eq!(findings.len(), 3);
    assert!(matches!(findings[0], StructuralFinding::UnexpectedColumns { .. }));
    assert!(matches!(findings[1], StructuralFinding::MissingColumns { .. }));
    assert!(matches!(findings[2], StructuralFinding::NonNumericColumn { .. }));
}

#[test]
fn integer_columns_are_numeric() {
    let schema = schema(&["n"], &["n"]);
    let df = DataFrame::new(vec![Series::new("n".into(), vec![1i32, 2, 3]).into_column()]).unwrap();
    assert!(validate_numeric_columns(&df, &schema));
}

proptest! {
    #[test]
    fn column_count_is_width_equality(width in 1usize..12, declared in 1usize..12) {
        let names: Vec<String> = (0..width).map(|i| format!("c{i}")).collect();
        let declared_names: Vec<String> = (0..declared).map(|i| format!("d{i}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let declared_refs: Vec<&str> = declared_names.iter().map(String::as_str).collect();

        let schema = schema(&declared_refs, &[]);
        let df = float_frame(&refs);

        prop_assert_eq!(validate_column_count(&df, &schema), width == declared);
    }
}
