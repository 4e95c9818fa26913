use thiserror::Error;

/// Problems with a schema definition. These are fatal to pipeline construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("column entry {index} must have exactly one `name: dtype` key, found {keys}")]
    MalformedColumnEntry { index: usize, keys: usize },

    #[error("schema declares an empty column name")]
    EmptyColumnName,

    #[error("column '{column}' is declared more than once")]
    DuplicateColumn { column: String },

    #[error("numerical column '{column}' is not declared in columns")]
    UndeclaredNumericColumn { column: String },
}
