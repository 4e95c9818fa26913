//! CSV dataset loading.

use std::path::Path;

use polars::prelude::{CsvReadOptions, DataFrame, SerReader};
use tracing::debug;

use crate::error::{IngestError, Result};

/// Reads the header row of a CSV file.
///
/// Rejects files without a header, empty column names, and repeated column
/// names, so later checks can rely on unique names.
pub fn read_csv_headers(path: &Path) -> Result<Vec<String>> {
    std::fs::metadata(path).map_err(|e| IngestError::io(path, e))?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    let record = reader.headers().map_err(|e| IngestError::CsvParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    if record.is_empty() {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    let mut headers: Vec<String> = Vec::with_capacity(record.len());
    for (position, raw) in record.iter().enumerate() {
        // Names are kept verbatim so they match the columns polars loads
        let name = raw.trim_start_matches('\u{feff}').to_string();
        if name.is_empty() {
            return Err(IngestError::EmptyColumnName {
                path: path.to_path_buf(),
                position,
            });
        }
        if headers.contains(&name) {
            return Err(IngestError::DuplicateColumn {
                path: path.to_path_buf(),
                column: name,
            });
        }
        headers.push(name);
    }
    Ok(headers)
}

/// Reads a CSV file into a Polars DataFrame.
///
/// Column types are inferred from every row, so a single non-numeric cell
/// turns the whole column into a string column.
pub fn read_dataset(path: &Path) -> Result<DataFrame> {
    let headers = read_csv_headers(path)?;

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    debug!(
        path = %path.display(),
        rows = df.height(),
        columns = headers.len(),
        "dataset loaded"
    );
    Ok(df)
}
