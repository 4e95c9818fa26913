//! Schema file loading.

use std::path::Path;

use dv_model::Schema;
use tracing::info;

use crate::error::{IngestError, Result};

/// Loads a YAML schema file.
///
/// Parse failures and inconsistent definitions are both reported as
/// [`IngestError::SchemaParse`].
pub fn load_schema(path: &Path) -> Result<Schema> {
    let content = std::fs::read_to_string(path).map_err(|e| IngestError::io(path, e))?;
    let schema: Schema =
        serde_yaml::from_str(&content).map_err(|e| IngestError::SchemaParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    info!(
        path = %path.display(),
        columns = schema.column_count(),
        numerical_columns = schema.numerical_columns().len(),
        "schema loaded"
    );
    Ok(schema)
}
