//! Requirements on the set of column names.

use regex::Regex;

use crate::error::Result;
use crate::result::{CheckResult, Shortfall, quote_list};
use crate::table::{Table, normalize_name};

use super::Rule;

/// Every listed column must exist.
///
/// The fix renames a column whose normalized name equals the normalized form
/// of a missing one, so `col_1` becomes `Col_1` when `Col_1` is required.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnsNamed {
    columns: Vec<String>,
}

impl ColumnsNamed {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}

impl Rule for ColumnsNamed {
    fn description(&self) -> String {
        format!("Must have columns {}.", quote_list(&self.columns))
    }

    fn check(&self, table: &Table) -> CheckResult {
        Shortfall::new()
            .with_missing(table.missing_columns(&self.columns))
            .into_result()
    }

    fn fix(&self, table: &mut Table) {
        for wanted in &self.columns {
            if table.contains(wanted) {
                continue;
            }
            let Some(found) = table.normal_colnames().shift_remove(&normalize_name(wanted)) else {
                continue;
            };
            if table.rename_column(&found, wanted.clone()) {
                tracing::debug!(from = %found, to = %wanted, "renamed column");
            }
        }
    }
}

/// Every column name must contain a match for the pattern.
#[derive(Debug, Clone)]
pub struct ColumnsMatching {
    pattern: Regex,
}

impl ColumnsMatching {
    pub fn new(pattern: &str) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl Rule for ColumnsMatching {
    fn description(&self) -> String {
        format!("All columns must match pattern '{}'.", self.pattern.as_str())
    }

    fn check(&self, table: &Table) -> CheckResult {
        let not_matching = table
            .colnames()
            .into_iter()
            .filter(|name| !self.pattern.is_match(name))
            .map(str::to_string)
            .collect();

        Shortfall::new().with_not_matching(not_matching).into_result()
    }
}
