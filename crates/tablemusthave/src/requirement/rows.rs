//! Row-wise requirements across one or more columns.

use indexmap::IndexMap;

use crate::error::{Result, TableMustHaveError};
use crate::result::{CheckResult, Repeat, Shortfall, quote_list};
use crate::table::Table;

use super::Rule;

/// A cell counts as filled when it is present and non-empty.
fn is_filled(cell: &Option<&str>) -> bool {
    matches!(cell, Some(v) if !v.is_empty())
}

fn collect_columns<I, S>(columns: I, kind: &'static str) -> Result<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
    if columns.is_empty() {
        return Err(TableMustHaveError::EmptyColumnList(kind));
    }
    Ok(columns)
}

/// The last column must be filled in on every row where all the others are.
///
/// With a single column, every row must have it filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SomeValueFor {
    columns: Vec<String>,
}

impl SomeValueFor {
    pub fn new<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Self {
            columns: collect_columns(columns, "SomeValueFor")?,
        })
    }

    /// The column must be filled in on every row.
    pub fn single(column: impl Into<String>) -> Self {
        Self {
            columns: vec![column.into()],
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}

impl Rule for SomeValueFor {
    fn description(&self) -> String {
        match self.columns.as_slice() {
            [column] => format!("Values of '{}' must not be missing or empty.", column),
            [when, then] => format!("Must have '{}' filled in when '{}' is filled in.", then, when),
            [when @ .., then] => format!(
                "Must have '{}' filled in when {} are filled in.",
                then,
                quote_list(when)
            ),
            [] => "No columns given.".to_string(),
        }
    }

    fn check(&self, table: &Table) -> CheckResult {
        let Some(rows) = table.rows_for(&self.columns) else {
            return CheckResult::doesnt_apply(table.missing_columns(&self.columns));
        };

        let indices = rows
            .enumerate()
            .filter(|(_, cells)| match cells.split_last() {
                Some((then, when)) => when.iter().all(is_filled) && !is_filled(then),
                None => false,
            })
            .map(|(idx, _)| idx)
            .collect();

        Shortfall::new().with_row_indices(indices).into_result()
    }
}

/// No two rows may carry the same values across the columns. Rows where all
/// of the columns are empty are exempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniqueValuesFor {
    columns: Vec<String>,
}

impl UniqueValuesFor {
    pub fn new<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Self {
            columns: collect_columns(columns, "UniqueValuesFor")?,
        })
    }

    /// Values of a single column must be unique.
    pub fn single(column: impl Into<String>) -> Self {
        Self {
            columns: vec![column.into()],
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}

impl Rule for UniqueValuesFor {
    fn description(&self) -> String {
        match self.columns.as_slice() {
            [column] => format!("Values of '{}' must be unique.", column),
            columns => format!("Values of {} must be unique together.", quote_list(columns)),
        }
    }

    fn check(&self, table: &Table) -> CheckResult {
        let Some(rows) = table.rows_for(&self.columns) else {
            return CheckResult::doesnt_apply(table.missing_columns(&self.columns));
        };

        let mut counts: IndexMap<Vec<Option<&str>>, usize> = IndexMap::new();
        for cells in rows.filter(|cells| cells.iter().any(is_filled)) {
            *counts.entry(cells).or_default() += 1;
        }

        let repeated = counts
            .into_iter()
            .filter(|&(_, count)| count > 1)
            .map(|(cells, count)| {
                let values = cells.into_iter().map(|c| c.map(str::to_string)).collect();
                Repeat::new(values, count)
            })
            .collect();

        Shortfall::new().with_repeated(repeated).into_result()
    }
}
