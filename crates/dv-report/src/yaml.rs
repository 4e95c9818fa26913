//! Generic YAML file helpers.

use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{ReportError, Result};
use crate::fs::ensure_parent_dir;

/// Serializes `content` to `path`, creating parent directories.
pub fn write_yaml_file<T: Serialize + ?Sized>(path: &Path, content: &T) -> Result<()> {
    ensure_parent_dir(path)?;
    let yaml = serde_yaml::to_string(content).map_err(|source| ReportError::Yaml {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, yaml).map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })
}

pub fn read_yaml_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|source| ReportError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml::from_str(&content).map_err(|source| ReportError::Yaml {
        path: path.to_path_buf(),
        source,
    })
}
