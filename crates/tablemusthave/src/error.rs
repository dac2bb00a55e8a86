//! Error types for the tablemusthave library.
//!
//! Only caller mistakes are errors. A table that fails its requirements is
//! reported through [`CheckResult`](crate::CheckResult), never through this type.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for tablemusthave operations.
#[derive(Debug, Error)]
pub enum TableMustHaveError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Regex compilation error.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No header record to read column names from.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Rows carry more values than there are column names.
    #[error(
        "Expected number of column names to equal number of columns of values. \
         Saw {columns} column names and {values} columns of values."
    )]
    ColumnCount { columns: usize, values: usize },

    /// A column name appears more than once.
    #[error("Duplicate column name: '{0}'")]
    DuplicateColumn(String),

    /// A column's values don't line up with the table's rows.
    #[error("Column '{column}' has {found} values, expected {expected}")]
    ColumnLength {
        column: String,
        expected: usize,
        found: usize,
    },

    /// A multi-column requirement was built without any columns.
    #[error("{0} needs at least one column")]
    EmptyColumnList(&'static str),
}

/// Result type alias for tablemusthave operations.
pub type Result<T> = std::result::Result<T, TableMustHaveError>;
