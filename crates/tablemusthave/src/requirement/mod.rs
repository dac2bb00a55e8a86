//! Requirements a table can be checked against and, where possible, fixed to meet.

mod columns;
mod rows;
mod values;

use std::fmt;

pub use columns::{ColumnsMatching, ColumnsNamed};
pub use rows::{SomeValueFor, UniqueValuesFor};
pub use values::{ValuesInSet, ValuesMatching};

use crate::error::Result;
use crate::result::CheckResult;
use crate::table::Table;

/// A single independently checkable rule.
pub trait Rule {
    /// One-line, human-readable statement of the rule.
    fn description(&self) -> String;

    /// Check the table. Never mutates it.
    fn check(&self, table: &Table) -> CheckResult;

    /// Repair what can be repaired automatically. Rules without a repair
    /// leave the table untouched.
    fn fix(&self, _table: &mut Table) {}
}

/// One of the supported requirement kinds.
#[derive(Debug, Clone)]
pub enum Requirement {
    ColumnsNamed(ColumnsNamed),
    ColumnsMatching(ColumnsMatching),
    ValuesInSet(ValuesInSet),
    ValuesMatching(ValuesMatching),
    SomeValueFor(SomeValueFor),
    UniqueValuesFor(UniqueValuesFor),
}

impl Requirement {
    /// Every listed column must exist.
    pub fn columns_named<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ColumnsNamed::new(columns).into()
    }

    /// Every column name must contain a match for `pattern`.
    pub fn columns_matching(pattern: &str) -> Result<Self> {
        Ok(ColumnsMatching::new(pattern)?.into())
    }

    /// Every value of `column` must be one of `allowed`.
    pub fn values_in_set<I, S>(column: impl Into<String>, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ValuesInSet::new(column, allowed).into()
    }

    /// Every present value of `column` must contain a match for `pattern`.
    pub fn values_matching(column: impl Into<String>, pattern: &str) -> Result<Self> {
        Ok(ValuesMatching::new(column, pattern)?.into())
    }

    /// The last column must be filled in wherever all the others are.
    pub fn some_value_for<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(SomeValueFor::new(columns)?.into())
    }

    /// `column` must be filled in on every row.
    pub fn some_value(column: impl Into<String>) -> Self {
        SomeValueFor::single(column).into()
    }

    /// The tuple of values across `columns` must not repeat.
    pub fn unique_values_for<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(UniqueValuesFor::new(columns)?.into())
    }

    /// Values of `column` must be unique.
    pub fn unique_values(column: impl Into<String>) -> Self {
        UniqueValuesFor::single(column).into()
    }

    /// Same as [`Requirement::unique_values_for`].
    pub fn unique_values_together<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::unique_values_for(columns)
    }

    fn rule(&self) -> &dyn Rule {
        match self {
            Requirement::ColumnsNamed(r) => r,
            Requirement::ColumnsMatching(r) => r,
            Requirement::ValuesInSet(r) => r,
            Requirement::ValuesMatching(r) => r,
            Requirement::SomeValueFor(r) => r,
            Requirement::UniqueValuesFor(r) => r,
        }
    }
}

impl Rule for Requirement {
    fn description(&self) -> String {
        self.rule().description()
    }

    fn check(&self, table: &Table) -> CheckResult {
        self.rule().check(table)
    }

    fn fix(&self, table: &mut Table) {
        self.rule().fix(table)
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description())
    }
}

macro_rules! impl_from_rule {
    ($($kind:ident),* $(,)?) => {
        $(
            impl From<$kind> for Requirement {
                fn from(rule: $kind) -> Self {
                    Requirement::$kind(rule)
                }
            }
        )*
    };
}

impl_from_rule!(
    ColumnsNamed,
    ColumnsMatching,
    ValuesInSet,
    ValuesMatching,
    SomeValueFor,
    UniqueValuesFor,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::NullValues;

    fn table1() -> Table {
        Table::new(
            ["col0", "col1", "col2", "col3", "col4"],
            vec![
                vec![Some("a"), Some("b"), Some("c"), Some("m"), Some("r")],
                vec![Some("d"), None, Some("f"), Some("m"), Some("r")],
                vec![Some("g"), Some("h"), None, Some("q"), Some("r")],
            ],
            &NullValues::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_column_missing_doesnt_apply() {
        let t = table1();
        let reqs = vec![
            Requirement::values_in_set("colz", ["a"]),
            Requirement::some_value("colz"),
            Requirement::some_value_for(["colz", "col0"]).unwrap(),
            Requirement::values_matching("colz", "abc").unwrap(),
            Requirement::unique_values("colz"),
            Requirement::unique_values_for(["colz", "col0"]).unwrap(),
        ];
        for req in reqs {
            assert_eq!(req.check(&t).success(), None, "{}", req);
        }
    }

    #[test]
    fn test_dispatch_matches_inner_rule() {
        let t = table1();
        let inner = ValuesInSet::new("col0", ["a", "b", "d"]);
        let req = Requirement::from(inner.clone());
        assert_eq!(req.description(), inner.description());
        assert_eq!(req.check(&t), inner.check(&t));
    }

    #[test]
    fn test_fix_through_enum() {
        let mut t = table1();
        let req = Requirement::columns_named(["Col_1"]);
        req.fix(&mut t);
        assert!(t.contains("Col_1"));
    }

    #[test]
    fn test_identity_fixes() {
        let mut t = table1();
        let before = t.clone();
        for req in [
            Requirement::columns_matching("col[1234]").unwrap(),
            Requirement::values_matching("col1", "^[a-d]$").unwrap(),
            Requirement::some_value("col1"),
            Requirement::unique_values("col3"),
        ] {
            req.fix(&mut t);
        }
        assert_eq!(t, before);
    }

    #[test]
    fn test_display_is_description() {
        let req = Requirement::unique_values_together(["a", "b"]).unwrap();
        assert_eq!(req.to_string(), "Values of 'a', 'b' must be unique together.");
    }
}
