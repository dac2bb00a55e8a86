//! Null tokens and CSV reader configuration.

use indexmap::IndexSet;
use once_cell::sync::Lazy;

use super::data::Cell;

/// Raw values read as absent unless the caller supplies a different set.
pub const DEFAULT_NULL_TOKENS: &[&str] = &[
    "",
    "0000-00-00",
    "Null",
    "null",
    "NA",
    "N/A",
    "na",
    "n/a",
    "None",
    "none",
];

static DEFAULT_NULL_VALUES: Lazy<NullValues> =
    Lazy::new(|| DEFAULT_NULL_TOKENS.iter().copied().collect());

/// Set of raw strings that are converted to absent when a table is built.
///
/// Matching is exact: `"NA"` is null by default, `"Na"` and `" NA"` are not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NullValues {
    tokens: IndexSet<String>,
}

impl NullValues {
    /// An empty set; every raw string is kept as-is.
    pub fn none() -> Self {
        Self {
            tokens: IndexSet::new(),
        }
    }

    /// The shared default set (see [`DEFAULT_NULL_TOKENS`]).
    pub fn standard() -> &'static NullValues {
        &DEFAULT_NULL_VALUES
    }

    /// Add a token to the set.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.tokens.insert(token.into());
        self
    }

    /// Check if a raw value is one of the null tokens.
    pub fn is_null(&self, value: &str) -> bool {
        self.tokens.contains(value)
    }

    /// Convert a raw cell, turning null tokens into absent.
    pub fn normalize(&self, cell: Cell) -> Cell {
        cell.filter(|v| !self.is_null(v))
    }

    /// Iterate over the tokens in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl Default for NullValues {
    fn default() -> Self {
        Self::standard().clone()
    }
}

impl<S: Into<String>> FromIterator<S> for NullValues {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            tokens: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Options passed through to the CSV record reader.
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Field delimiter.
    pub delimiter: u8,
    /// Quote character.
    pub quote: u8,
    /// Whether quoted fields are recognized at all.
    pub quoting: bool,
    /// Raw values to read as absent.
    pub null_values: NullValues,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            quoting: true,
            null_values: NullValues::default(),
        }
    }
}

impl CsvOptions {
    /// Create options with the default comma-separated settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Options for tab-separated input.
    pub fn tsv() -> Self {
        Self::default().with_delimiter(b'\t')
    }

    /// Set the field delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the quote character.
    pub fn with_quote(mut self, quote: u8) -> Self {
        self.quote = quote;
        self
    }

    /// Enable or disable quote handling.
    pub fn with_quoting(mut self, quoting: bool) -> Self {
        self.quoting = quoting;
        self
    }

    /// Replace the null token set.
    pub fn with_null_values(mut self, null_values: NullValues) -> Self {
        self.null_values = null_values;
        self
    }

    /// Reader builder with these options. The header is read as an ordinary
    /// record and short records are allowed.
    pub(crate) fn reader_builder(&self) -> csv::ReaderBuilder {
        let mut builder = csv::ReaderBuilder::new();
        builder
            .delimiter(self.delimiter)
            .quote(self.quote)
            .quoting(self.quoting)
            .has_headers(false)
            .flexible(true);
        builder
    }
}
