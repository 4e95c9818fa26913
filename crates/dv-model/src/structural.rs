use std::fmt;

use serde::{Deserialize, Serialize};

use crate::split::DatasetSplit;

/// A structural defect found while checking a dataset against its schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StructuralFinding {
    /// Dataset width differs from the number of schema columns.
    ColumnCountMismatch { expected: usize, actual: usize },
    /// Dataset columns outside the declared numeric set.
    UnexpectedColumns { columns: Vec<String> },
    /// Declared numeric columns absent from the dataset.
    MissingColumns { columns: Vec<String> },
    /// A declared numeric column whose values are not numerically typed.
    NonNumericColumn { column: String, dtype: String },
}

impl fmt::Display for StructuralFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructuralFinding::ColumnCountMismatch { expected, actual } => {
                write!(f, "expected {expected} columns, found {actual}")
            }
            StructuralFinding::UnexpectedColumns { columns } => {
                write!(f, "unexpected non-numerical columns: {}", columns.join(", "))
            }
            StructuralFinding::MissingColumns { columns } => {
                write!(f, "missing numerical columns: {}", columns.join(", "))
            }
            StructuralFinding::NonNumericColumn { column, dtype } => {
                write!(f, "column '{column}' is not numeric (found {dtype})")
            }
        }
    }
}

/// Structural findings for one dataset split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuralReport {
    pub split: DatasetSplit,
    pub findings: Vec<StructuralFinding>,
}

impl StructuralReport {
    pub fn new(split: DatasetSplit) -> Self {
        Self {
            split,
            findings: Vec::new(),
        }
    }

    pub fn add(&mut self, finding: StructuralFinding) {
        self.findings.push(finding);
    }

    pub fn passed(&self) -> bool {
        self.findings.is_empty()
    }

    /// Findings rendered as messages prefixed with the split name.
    pub fn messages(&self) -> Vec<String> {
        self.findings
            .iter()
            .map(|finding| format!("{} dataset: {finding}", self.split))
            .collect()
    }
}
