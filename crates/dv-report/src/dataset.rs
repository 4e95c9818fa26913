//! Dataset CSV output.

use std::fs::File;
use std::path::Path;

use polars::prelude::{CsvWriter, DataFrame, SerWriter};
use tracing::info;

use crate::error::{ReportError, Result};
use crate::fs::ensure_parent_dir;

/// Writes `df` as CSV with a header row, creating parent directories.
pub fn write_dataset(path: &Path, df: &DataFrame) -> Result<()> {
    ensure_parent_dir(path)?;
    let mut file = File::create(path).map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    // CsvWriter needs a mutable frame; the caller's frame stays untouched.
    let mut output = df.clone();
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut output)
        .map_err(|e| ReportError::Csv {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    info!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "dataset written"
    );
    Ok(())
}
