//! Requirements on the values of a single column.

use indexmap::IndexMap;
use regex::Regex;

use crate::error::Result;
use crate::result::{CheckResult, Shortfall, quote_cell};
use crate::table::{Cell, Table, normalize_cell};

use super::Rule;

/// Every value in a column must be one of the allowed values.
///
/// Absent values are compared like any other value: they are flagged unless
/// absent is itself allowed (see [`ValuesInSet::allow_absent`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValuesInSet {
    column: String,
    allowed: Vec<Cell>,
}

impl ValuesInSet {
    pub fn new<I, S>(column: impl Into<String>, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            column: column.into(),
            allowed: allowed.into_iter().map(|a| Some(a.into())).collect(),
        }
    }

    /// Also accept absent values.
    pub fn allow_absent(mut self) -> Self {
        if !self.allowed.contains(&None) {
            self.allowed.push(None);
        }
        self
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn allowed(&self) -> &[Cell] {
        &self.allowed
    }
}

impl Rule for ValuesInSet {
    fn description(&self) -> String {
        let allowed: Vec<String> = self.allowed.iter().map(|a| quote_cell(a.as_deref())).collect();
        format!(
            "Values of '{}' must be in list: {}.",
            self.column,
            allowed.join(", ")
        )
    }

    fn check(&self, table: &Table) -> CheckResult {
        let Some(values) = table.get(&self.column) else {
            return CheckResult::doesnt_apply(vec![self.column.clone()]);
        };

        let not_allowed = values
            .iter()
            .filter(|v| !self.allowed.contains(v))
            .cloned()
            .collect();

        Shortfall::new().with_not_allowed(not_allowed).into_result()
    }

    /// Replace each disallowed value with the allowed value it normalizes to.
    fn fix(&self, table: &mut Table) {
        let Some(values) = table.get_mut(&self.column) else {
            tracing::debug!(column = %self.column, "column missing, nothing to fix");
            return;
        };

        // Later allowed values win when two normalize alike.
        let canonical: IndexMap<String, &Cell> = self
            .allowed
            .iter()
            .map(|a| (normalize_cell(a.as_deref()), a))
            .collect();

        for value in values.iter_mut() {
            if self.allowed.contains(value) {
                continue;
            }
            if let Some(&replacement) = canonical.get(&normalize_cell(value.as_deref())) {
                tracing::debug!(
                    column = %self.column,
                    from = ?value,
                    to = ?replacement,
                    "canonicalized value"
                );
                *value = replacement.clone();
            }
        }
    }
}

/// Every present value in a column must contain a match for the pattern.
/// Absent values always pass.
#[derive(Debug, Clone)]
pub struct ValuesMatching {
    column: String,
    pattern: Regex,
}

impl ValuesMatching {
    pub fn new(column: impl Into<String>, pattern: &str) -> Result<Self> {
        Ok(Self {
            column: column.into(),
            pattern: Regex::new(pattern)?,
        })
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl Rule for ValuesMatching {
    fn description(&self) -> String {
        format!(
            "Values of '{}' must match pattern '{}'.",
            self.column,
            self.pattern.as_str()
        )
    }

    fn check(&self, table: &Table) -> CheckResult {
        let Some(values) = table.get(&self.column) else {
            return CheckResult::doesnt_apply(vec![self.column.clone()]);
        };

        let not_matching = values
            .iter()
            .flatten()
            .filter(|v| !self.pattern.is_match(v))
            .cloned()
            .collect();

        Shortfall::new().with_not_matching(not_matching).into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::NullValues;

    fn table1() -> Table {
        Table::new(
            ["col0", "col1", "col2"],
            vec![
                vec![Some("a"), Some("b"), Some("c")],
                vec![Some("d"), None, Some("f")],
                vec![Some("g"), Some("h"), None],
            ],
            &NullValues::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_values_in_set() {
        let t = table1();
        let req = ValuesInSet::new("col0", ["a", "b", "c", "d", "e", "f", "g"]);
        assert!(req.check(&t).is_pass());
    }

    #[test]
    fn test_values_in_set_fail() {
        let t = table1();
        let result = ValuesInSet::new("col0", ["a", "b", "d"]).check(&t);
        assert_eq!(
            result.shortfall().unwrap().not_allowed,
            vec![Some("g".to_string())]
        );
    }

    #[test]
    fn test_values_in_set_flags_absent() {
        let t = table1();
        let req = ValuesInSet::new("col1", ["b", "h"]);
        assert_eq!(req.check(&t).shortfall().unwrap().not_allowed, vec![None]);
        assert!(req.allow_absent().check(&t).is_pass());
    }

    #[test]
    fn test_values_in_set_missing_column() {
        let t = table1();
        let result = ValuesInSet::new("colz", ["a"]).check(&t);
        assert_eq!(result, CheckResult::doesnt_apply(vec!["colz".into()]));
    }

    #[test]
    fn test_values_in_set_fix() {
        let mut t = table1();
        let req = ValuesInSet::new("col0", ["A", "D_", "_g"]);
        assert!(req.check(&t).is_fail());

        req.fix(&mut t);
        assert!(req.check(&t).is_pass());
        assert_eq!(
            t.get("col0").unwrap(),
            &[Some("A".to_string()), Some("D_".to_string()), Some("_g".to_string())]
        );
    }

    #[test]
    fn test_values_in_set_fix_leaves_unknown_values() {
        let mut t = table1();
        let req = ValuesInSet::new("col0", ["A"]);
        req.fix(&mut t);
        assert_eq!(
            req.check(&t).shortfall().unwrap().not_allowed,
            vec![Some("d".to_string()), Some("g".to_string())]
        );
    }

    #[test]
    fn test_values_in_set_fix_fills_absent_with_blank_like_value() {
        let mut t = table1();
        ValuesInSet::new("col1", ["b", "h", "_"]).fix(&mut t);
        assert_eq!(
            t.get("col1").unwrap(),
            &[Some("b".to_string()), Some("_".to_string()), Some("h".to_string())]
        );
    }

    #[test]
    fn test_values_in_set_fix_missing_column() {
        let mut t = table1();
        let before = t.clone();
        ValuesInSet::new("colz", ["a"]).fix(&mut t);
        assert_eq!(t, before);
    }

    #[test]
    fn test_values_matching() {
        let t = table1();
        assert!(ValuesMatching::new("col1", "^[a-z]$").unwrap().check(&t).is_pass());

        let result = ValuesMatching::new("col1", "^[a-d]$").unwrap().check(&t);
        assert_eq!(result.shortfall().unwrap().not_matching, vec!["h"]);
    }

    #[test]
    fn test_values_matching_is_search() {
        let t = table1();
        assert!(ValuesMatching::new("col0", "[adg]").unwrap().check(&t).is_pass());
    }

    #[test]
    fn test_values_matching_missing_column() {
        let t = table1();
        let result = ValuesMatching::new("colz", "abc").unwrap().check(&t);
        assert!(result.is_not_applicable());
    }

    #[test]
    fn test_descriptions() {
        assert_eq!(
            ValuesInSet::new("col0", ["a", "b"]).allow_absent().description(),
            "Values of 'col0' must be in list: 'a', 'b', <absent>."
        );
        assert_eq!(
            ValuesMatching::new("SampleID", "^[A-Za-z]").unwrap().description(),
            "Values of 'SampleID' must match pattern '^[A-Za-z]'."
        );
    }
}
