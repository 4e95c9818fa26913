//! Dataset ingestion utilities.
//!
//! Loads CSV datasets into Polars DataFrames, reads YAML schema files, and
//! splits a source dataset into train and test sets.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use dv_ingest::{load_schema, read_dataset};
//!
//! let schema = load_schema(Path::new("data_schema/schema.yaml"))?;
//! let train = read_dataset(Path::new("artifacts/train.csv"))?;
//! ```

mod error;
mod reader;
mod schema;
mod split;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use reader::{read_csv_headers, read_dataset};

// === Schema ===
pub use schema::load_schema;

// === Splitting ===
pub use split::{DEFAULT_SPLIT_SEED, DEFAULT_TEST_RATIO, SplitOptions, train_test_split};
