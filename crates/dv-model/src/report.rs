use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Drift outcome for a single column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnDrift {
    pub p_value: f64,
    pub drift_detected: bool,
}

/// Per-column drift results keyed by column name.
///
/// Serializes as a plain mapping so the report file reads
/// `column: {p_value, drift_detected}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DriftReport {
    columns: BTreeMap<String, ColumnDrift>,
}

impl DriftReport {
    pub fn from_columns(columns: BTreeMap<String, ColumnDrift>) -> Self {
        Self { columns }
    }

    pub fn get(&self, column: &str) -> Option<&ColumnDrift> {
        self.columns.get(column)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ColumnDrift)> {
        self.columns.iter().map(|(name, drift)| (name.as_str(), drift))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn drifted_columns(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, drift)| drift.drift_detected)
            .map(|(name, _)| name)
            .collect()
    }

    /// True when no column drifted.
    pub fn is_stable(&self) -> bool {
        self.columns.values().all(|drift| !drift.drift_detected)
    }
}
