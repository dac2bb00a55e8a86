//! Column-oriented string table.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use indexmap::{IndexMap, IndexSet};

use crate::error::{Result, TableMustHaveError};

use super::normalize::normalize_name;
use super::options::{CsvOptions, NullValues};

/// A single table value: a string, or `None` when absent.
pub type Cell = Option<String>;

/// Conversion of raw input values into table cells.
pub trait IntoCell {
    fn into_cell(self) -> Cell;
}

impl IntoCell for &str {
    fn into_cell(self) -> Cell {
        Some(self.to_string())
    }
}

impl IntoCell for String {
    fn into_cell(self) -> Cell {
        Some(self)
    }
}

impl IntoCell for &String {
    fn into_cell(self) -> Cell {
        Some(self.clone())
    }
}

impl IntoCell for Option<&str> {
    fn into_cell(self) -> Cell {
        self.map(str::to_string)
    }
}

impl IntoCell for Option<String> {
    fn into_cell(self) -> Cell {
        self
    }
}

/// Tabular data stored by column.
///
/// Column names are unique and keep their insertion order. Every column holds
/// exactly [`row_count`](Table::row_count) cells. The row count is fixed once
/// the table is built; cell values can be rewritten, columns renamed, and
/// whole columns replaced or added with [`set_column`](Table::set_column).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    /// Column name to slot in `columns`.
    index: IndexMap<String, usize>,
    columns: Vec<Vec<Cell>>,
    row_count: usize,
}

impl Table {
    /// Build a table from column names and row-major records.
    ///
    /// Records shorter than the header are padded with absent cells. A record
    /// longer than the header is an error. Raw values found in `null_values`
    /// become absent.
    pub fn new<N, R, C>(colnames: N, rows: R, null_values: &NullValues) -> Result<Self>
    where
        N: IntoIterator,
        N::Item: Into<String>,
        R: IntoIterator,
        R::Item: IntoIterator<Item = C>,
        C: IntoCell,
    {
        let index = build_index(colnames)?;
        let width = index.len();
        let mut columns: Vec<Vec<Cell>> = vec![Vec::new(); width];
        let mut row_count = 0;
        let mut padded = 0;

        for row in rows {
            let mut cells: Vec<Cell> = row.into_iter().map(IntoCell::into_cell).collect();
            if cells.len() > width {
                return Err(TableMustHaveError::ColumnCount {
                    columns: width,
                    values: cells.len(),
                });
            }
            if cells.len() < width {
                padded += 1;
                cells.resize(width, None);
            }
            for (column, cell) in columns.iter_mut().zip(cells) {
                column.push(null_values.normalize(cell));
            }
            row_count += 1;
        }

        if padded > 0 {
            tracing::debug!(rows = padded, "padded short rows with absent values");
        }

        Ok(Self {
            index,
            columns,
            row_count,
        })
    }

    /// Build a table from columns supplied directly, in order.
    ///
    /// All columns must have the same length.
    pub fn from_data<I, K, V, C>(data: I, null_values: &NullValues) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: IntoIterator<Item = C>,
        C: IntoCell,
    {
        let mut names = Vec::new();
        let mut columns = Vec::new();
        let mut row_count = None;

        for (name, values) in data {
            let name = name.into();
            let column: Vec<Cell> = values
                .into_iter()
                .map(|v| null_values.normalize(v.into_cell()))
                .collect();

            let expected = *row_count.get_or_insert(column.len());
            if column.len() != expected {
                return Err(TableMustHaveError::ColumnLength {
                    column: name,
                    expected,
                    found: column.len(),
                });
            }
            names.push(name);
            columns.push(column);
        }

        Ok(Self {
            index: build_index(names)?,
            columns,
            row_count: row_count.unwrap_or(0),
        })
    }

    /// Read a table from CSV. The first record is the header.
    pub fn from_csv<R: Read>(reader: R, options: &CsvOptions) -> Result<Self> {
        let mut reader = options.reader_builder().from_reader(reader);
        let mut records = reader.records();

        let header = match records.next() {
            Some(record) => record?,
            None => return Err(TableMustHaveError::EmptyData("No header row found".to_string())),
        };
        let colnames: Vec<String> = header.iter().map(str::to_string).collect();

        let rows = records
            .map(|record| record.map(|r| r.iter().map(str::to_string).collect::<Vec<_>>()))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Self::new(colnames, rows, &options.null_values)
    }

    /// Read a CSV file from disk.
    pub fn from_path(path: impl AsRef<Path>, options: &CsvOptions) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| TableMustHaveError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_csv(file, options)
    }

    /// Column names in order.
    pub fn colnames(&self) -> Vec<&str> {
        self.index.keys().map(String::as_str).collect()
    }

    /// Normalized column name to actual column name. When two columns
    /// normalize alike, the later one wins.
    pub fn normal_colnames(&self) -> IndexMap<String, String> {
        self.index
            .keys()
            .map(|name| (normalize_name(name), name.clone()))
            .collect()
    }

    /// Values of a column in row order, or `None` if there is no such column.
    pub fn get(&self, name: &str) -> Option<&[Cell]> {
        self.index.get(name).map(|&slot| self.columns[slot].as_slice())
    }

    /// Mutable access to a column's values. The length can't change.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut [Cell]> {
        let slot = *self.index.get(name)?;
        Some(self.columns[slot].as_mut_slice())
    }

    /// Check if a column exists.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Names from `names` that aren't columns of this table, in the given order.
    pub fn missing_columns<S: AsRef<str>>(&self, names: &[S]) -> Vec<String> {
        names
            .iter()
            .map(AsRef::as_ref)
            .filter(|name| !self.contains(name))
            .map(str::to_string)
            .collect()
    }

    /// Row-wise tuples across the named columns, or `None` if any is missing.
    pub fn rows_for<'a>(
        &'a self,
        names: &[String],
    ) -> Option<impl Iterator<Item = Vec<Option<&'a str>>> + 'a> {
        let columns = names
            .iter()
            .map(|name| self.get(name))
            .collect::<Option<Vec<&'a [Cell]>>>()?;

        Some((0..self.row_count).map(move |row| {
            columns
                .iter()
                .map(|&column| column[row].as_deref())
                .collect()
        }))
    }

    /// Rename a column. The renamed column moves to the end of the column
    /// order. Returns false if `old` doesn't exist or `new` is already taken.
    pub fn rename_column(&mut self, old: &str, new: impl Into<String>) -> bool {
        let new = new.into();
        if old == new {
            return self.contains(old);
        }
        if self.contains(&new) {
            return false;
        }
        match self.index.shift_remove(old) {
            Some(slot) => {
                self.index.insert(new, slot);
                true
            }
            None => false,
        }
    }

    /// Replace a column's values, or add the column at the end if there is
    /// no column by that name. Values are stored as given; null tokens are
    /// not converted.
    pub fn set_column<V, C>(&mut self, name: impl Into<String>, values: V) -> Result<()>
    where
        V: IntoIterator<Item = C>,
        C: IntoCell,
    {
        let name = name.into();
        let column: Vec<Cell> = values.into_iter().map(IntoCell::into_cell).collect();
        if column.len() != self.row_count {
            return Err(TableMustHaveError::ColumnLength {
                column: name,
                expected: self.row_count,
                found: column.len(),
            });
        }

        match self.index.get(&name) {
            Some(&slot) => self.columns[slot] = column,
            None => {
                self.index.insert(name, self.columns.len());
                self.columns.push(column);
            }
        }
        Ok(())
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.index.len()
    }
}

fn build_index<N>(colnames: N) -> Result<IndexMap<String, usize>>
where
    N: IntoIterator,
    N::Item: Into<String>,
{
    let mut seen = IndexSet::new();
    for name in colnames {
        let name = name.into();
        if seen.contains(&name) {
            return Err(TableMustHaveError::DuplicateColumn(name));
        }
        seen.insert(name);
    }
    Ok(seen.into_iter().enumerate().map(|(slot, name)| (name, slot)).collect())
}
