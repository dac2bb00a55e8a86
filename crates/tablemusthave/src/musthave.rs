//! Ordered collections of requirements and their reports.

use std::fmt;

use serde::Serialize;

use crate::error::Result;
use crate::requirement::{Requirement, Rule};
use crate::result::{CheckResult, Status};
use crate::table::Table;

/// An ordered list of requirements a table must have.
///
/// Requirements are independent of each other and of any particular table,
/// so one specification can check many tables.
#[derive(Debug, Clone, Default)]
pub struct MustHave {
    requirements: Vec<Requirement>,
}

impl MustHave {
    /// Create an empty specification.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a requirement at the end.
    pub fn append(&mut self, requirement: impl Into<Requirement>) {
        self.requirements.push(requirement.into());
    }

    /// Add a requirement at the end, builder style.
    pub fn with(mut self, requirement: impl Into<Requirement>) -> Self {
        self.append(requirement);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &Requirement> {
        self.requirements.iter()
    }

    pub fn len(&self) -> usize {
        self.requirements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }

    /// Descriptions of each requirement, in order.
    pub fn descriptions(&self) -> impl Iterator<Item = String> + '_ {
        self.requirements.iter().map(|r| r.description())
    }

    /// Check each requirement in order. Lazy: each requirement is checked
    /// when the iterator reaches it.
    pub fn check<'a>(
        &'a self,
        table: &'a Table,
    ) -> impl Iterator<Item = (&'a Requirement, CheckResult)> + 'a {
        self.requirements.iter().map(move |requirement| {
            let result = requirement.check(table);
            tracing::debug!(
                requirement = %requirement,
                status = result.status().label(),
                "checked requirement"
            );
            (requirement, result)
        })
    }

    /// Apply each requirement's fix in order. Later fixes see the table as
    /// left by earlier ones.
    pub fn fix(&self, table: &mut Table) {
        for requirement in &self.requirements {
            requirement.fix(table);
        }
    }

    /// Check every requirement and collect the results.
    pub fn report(&self, table: &Table) -> Report {
        Report {
            entries: self
                .check(table)
                .map(|(requirement, result)| ReportEntry {
                    description: requirement.description(),
                    result,
                })
                .collect(),
        }
    }
}

impl<R: Into<Requirement>> Extend<R> for MustHave {
    fn extend<I: IntoIterator<Item = R>>(&mut self, iter: I) {
        self.requirements.extend(iter.into_iter().map(Into::into));
    }
}

impl<R: Into<Requirement>> FromIterator<R> for MustHave {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        let mut spec = Self::new();
        spec.extend(iter);
        spec
    }
}

impl<'a> IntoIterator for &'a MustHave {
    type Item = &'a Requirement;
    type IntoIter = std::slice::Iter<'a, Requirement>;

    fn into_iter(self) -> Self::IntoIter {
        self.requirements.iter()
    }
}

/// One requirement's line in a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportEntry {
    pub description: String,
    pub result: CheckResult,
}

/// Results of checking a table against a whole specification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    pub entries: Vec<ReportEntry>,
}

impl Report {
    fn count(&self, status: Status) -> usize {
        self.entries
            .iter()
            .filter(|e| e.result.status() == status)
            .count()
    }

    pub fn passed(&self) -> usize {
        self.count(Status::Pass)
    }

    pub fn failed(&self) -> usize {
        self.count(Status::Fail)
    }

    pub fn skipped(&self) -> usize {
        self.count(Status::NotApplicable)
    }

    /// True when no requirement failed. Skipped requirements don't count as failures.
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    /// Failed entries only.
    pub fn failures(&self) -> impl Iterator<Item = &ReportEntry> {
        self.entries.iter().filter(|e| e.result.is_fail())
    }

    /// Serialize the report to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{}", entry.description)?;
            writeln!(f, "{}", entry.result.message())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requirement::ValuesInSet;
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
    fn test_descriptions_in_order() {
        let spec = MustHave::new()
            .with(Requirement::columns_named(["col0"]))
            .with(Requirement::unique_values("col3"));
        let descriptions: Vec<String> = spec.descriptions().collect();
        assert_eq!(
            descriptions,
            vec!["Must have columns 'col0'.", "Values of 'col3' must be unique."]
        );
    }

    #[test]
    fn test_check_yields_one_result_per_requirement() {
        let t = table1();
        let spec: MustHave = vec![
            Requirement::columns_named(["col0"]),
            Requirement::unique_values("col3"),
            Requirement::some_value("colz"),
        ]
        .into_iter()
        .collect();

        let statuses: Vec<Status> = spec.check(&t).map(|(_, r)| r.status()).collect();
        assert_eq!(
            statuses,
            vec![Status::Pass, Status::Fail, Status::NotApplicable]
        );
    }

    #[test]
    fn test_duplicates_allowed() {
        let mut spec = MustHave::new();
        spec.append(Requirement::some_value("col0"));
        spec.append(Requirement::some_value("col0"));
        assert_eq!(spec.len(), 2);

        let mut seen = 0;
        for requirement in &spec {
            assert_eq!(requirement.description(), "Values of 'col0' must not be missing or empty.");
            seen += 1;
        }
        assert_eq!(seen, 2);
    }

    #[test]
    fn test_extend() {
        let mut spec = MustHave::new();
        spec.extend(["col0", "col1"].map(Requirement::some_value));
        spec.extend([ValuesInSet::new("col0", ["a"])]);
        assert_eq!(spec.len(), 3);
    }

    #[test]
    fn test_fix_is_sequential() {
        let mut t = table1();
        // The second requirement only applies once the first has renamed the column.
        let spec = MustHave::new()
            .with(Requirement::columns_named(["Col_0"]))
            .with(Requirement::values_in_set("Col_0", ["A", "D", "G"]));

        spec.fix(&mut t);
        assert!(spec.report(&t).is_success());
        assert_eq!(spec.report(&t).passed(), 2);
    }

    #[test]
    fn test_report_counts_and_display() {
        let t = table1();
        let spec = MustHave::new()
            .with(Requirement::columns_named(["col0"]))
            .with(Requirement::unique_values("col3"))
            .with(Requirement::some_value("colz"));
        let report = spec.report(&t);

        assert_eq!(report.passed(), 1);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.skipped(), 1);
        assert!(!report.is_success());
        assert_eq!(report.failures().count(), 1);

        let text = report.to_string();
        assert!(text.starts_with("Must have columns 'col0'.\nOK\n"));
        assert!(text.contains("Repeated: ('m') is repeated 2 times"));
        assert!(text.contains("Doesn't apply because column 'colz' is missing."));
    }

    #[test]
    fn test_report_json() {
        let t = table1();
        let report = MustHave::new()
            .with(Requirement::values_in_set("col0", ["a", "b", "d"]))
            .report(&t);
        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["entries"][0]["result"]["result"], "still_needs");
        assert_eq!(json["entries"][0]["result"]["not_allowed"], serde_json::json!(["g"]));
    }
}
