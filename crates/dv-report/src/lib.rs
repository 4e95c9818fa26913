//! Report and dataset persistence.
//!
//! - YAML helpers ([`write_yaml_file`], [`read_yaml_file`])
//! - Drift report files ([`write_drift_report`], [`read_drift_report`])
//! - Dataset CSV output ([`write_dataset`])

mod dataset;
mod drift;
mod error;
mod fs;
mod yaml;

pub use dataset::write_dataset;
pub use drift::{read_drift_report, write_drift_report};
pub use error::{ReportError, Result};
pub use yaml::{read_yaml_file, write_yaml_file};
