//! Table storage, null normalization and CSV ingestion.

mod data;
mod normalize;
mod options;

pub use data::{Cell, IntoCell, Table};
pub use normalize::{normalize_cell, normalize_name};
pub use options::{CsvOptions, DEFAULT_NULL_TOKENS, NullValues};
