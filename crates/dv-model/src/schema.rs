//! Expected dataset layout.
//!
//! A schema lists every expected column with its declared dtype and marks the
//! subset that must be numeric. It is built once per validation run and exposes
//! no mutating API.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

/// One expected column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: String,
    /// Declared dtype as written in the schema file (e.g. `int64`).
    pub dtype: String,
}

/// Expected columns plus the numeric subset.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "RawSchema", into = "RawSchema")]
pub struct Schema {
    columns: Vec<ColumnSpec>,
    numerical_columns: BTreeSet<String>,
}

impl Schema {
    /// Build a schema, checking that names are unique and that every numeric
    /// column is also declared as a column.
    pub fn new<I, S>(columns: Vec<ColumnSpec>, numerical_columns: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = BTreeSet::new();
        for column in &columns {
            if column.name.trim().is_empty() {
                return Err(SchemaError::EmptyColumnName);
            }
            if !seen.insert(column.name.as_str()) {
                return Err(SchemaError::DuplicateColumn {
                    column: column.name.clone(),
                });
            }
        }
        let numerical_columns: BTreeSet<String> =
            numerical_columns.into_iter().map(Into::into).collect();
        for name in &numerical_columns {
            if !seen.contains(name.as_str()) {
                return Err(SchemaError::UndeclaredNumericColumn {
                    column: name.clone(),
                });
            }
        }
        Ok(Self {
            columns,
            numerical_columns,
        })
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|column| column.name.as_str())
    }

    /// Columns that must hold numeric values.
    pub fn numerical_columns(&self) -> &BTreeSet<String> {
        &self.numerical_columns
    }
}

/// On-disk layout: `columns` is a list of single-key `name: dtype` mappings.
#[derive(Debug, Deserialize, Serialize)]
struct RawSchema {
    columns: Vec<BTreeMap<String, String>>,
    numerical_columns: Vec<String>,
}

impl TryFrom<RawSchema> for Schema {
    type Error = SchemaError;

    fn try_from(raw: RawSchema) -> Result<Self, Self::Error> {
        let mut columns = Vec::with_capacity(raw.columns.len());
        for (index, entry) in raw.columns.into_iter().enumerate() {
            if entry.len() != 1 {
                return Err(SchemaError::MalformedColumnEntry {
                    index,
                    keys: entry.len(),
                });
            }
            if let Some((name, dtype)) = entry.into_iter().next() {
                columns.push(ColumnSpec { name, dtype });
            }
        }
        Schema::new(columns, raw.numerical_columns)
    }
}

impl From<Schema> for RawSchema {
    fn from(schema: Schema) -> Self {
        Self {
            columns: schema
                .columns
                .into_iter()
                .map(|column| BTreeMap::from([(column.name, column.dtype)]))
                .collect(),
            numerical_columns: schema.numerical_columns.into_iter().collect(),
        }
    }
}
