//! Outcome of checking one requirement against a table.

use std::fmt;

use serde::Serialize;

use crate::table::Cell;

/// Three-way outcome of a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// The table meets the requirement.
    Pass,
    /// The table violates the requirement.
    Fail,
    /// The requirement's columns aren't in the table.
    NotApplicable,
}

impl Status {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Status::Pass => "Pass",
            Status::Fail => "Fail",
            Status::NotApplicable => "Not Applicable",
        }
    }

    /// `Some(true)` for pass, `Some(false)` for fail, `None` when not applicable.
    pub fn success(&self) -> Option<bool> {
        match self {
            Status::Pass => Some(true),
            Status::Fail => Some(false),
            Status::NotApplicable => None,
        }
    }
}

/// A value tuple that occurs more than once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Repeat {
    /// The repeated values, one per checked column.
    pub values: Vec<Cell>,
    /// How many rows carry this tuple.
    pub count: usize,
}

impl Repeat {
    pub fn new(values: Vec<Cell>, count: usize) -> Self {
        Self { values, count }
    }
}

impl fmt::Display for Repeat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values: Vec<String> = self.values.iter().map(|v| quote_cell(v.as_deref())).collect();
        write!(f, "({}) is repeated {} times", values.join(", "), self.count)
    }
}

/// What a table still needs to meet a requirement.
///
/// Only the fields relevant to the failing requirement are populated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Shortfall {
    /// Required columns that don't exist.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing: Vec<String>,
    /// Offending rows, numbered from 1.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rows: Vec<usize>,
    /// Column names or values that don't match a pattern.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub not_matching: Vec<String>,
    /// Values outside the allowed set.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub not_allowed: Vec<Cell>,
    /// Value tuples that occur more than once.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub repeated: Vec<Repeat>,
}

impl Shortfall {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the missing columns.
    pub fn with_missing(mut self, missing: Vec<String>) -> Self {
        self.missing = missing;
        self
    }

    /// Set the offending rows from 0-based indices.
    pub fn with_row_indices(mut self, indices: Vec<usize>) -> Self {
        self.rows = indices.into_iter().map(|i| i + 1).collect();
        self
    }

    /// Set the non-matching names or values.
    pub fn with_not_matching(mut self, not_matching: Vec<String>) -> Self {
        self.not_matching = not_matching;
        self
    }

    /// Set the disallowed values.
    pub fn with_not_allowed(mut self, not_allowed: Vec<Cell>) -> Self {
        self.not_allowed = not_allowed;
        self
    }

    /// Set the repeated tuples.
    pub fn with_repeated(mut self, repeated: Vec<Repeat>) -> Self {
        self.repeated = repeated;
        self
    }

    /// True when nothing is needed.
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty()
            && self.rows.is_empty()
            && self.not_matching.is_empty()
            && self.not_allowed.is_empty()
            && self.repeated.is_empty()
    }

    /// `AllGood` if nothing is needed, otherwise `StillNeeds`.
    pub fn into_result(self) -> CheckResult {
        if self.is_empty() {
            CheckResult::AllGood
        } else {
            CheckResult::StillNeeds(self)
        }
    }

    /// One line per populated field.
    pub fn message(&self) -> String {
        let mut lines = Vec::new();

        if !self.missing.is_empty() {
            lines.push(format!("Missing: {}", quote_list(&self.missing)));
        }
        if !self.rows.is_empty() {
            let rows: Vec<String> = self.rows.iter().map(|r| r.to_string()).collect();
            lines.push(format!("In rows (starting from 1): {}", rows.join(", ")));
        }
        if !self.not_matching.is_empty() {
            lines.push(format!("Not matching: {}", quote_list(&self.not_matching)));
        }
        if !self.not_allowed.is_empty() {
            let values: Vec<String> = self
                .not_allowed
                .iter()
                .map(|v| quote_cell(v.as_deref()))
                .collect();
            lines.push(format!("Not allowed: {}", values.join(", ")));
        }
        if !self.repeated.is_empty() {
            let reps: Vec<String> = self.repeated.iter().map(Repeat::to_string).collect();
            lines.push(format!("Repeated: {}", reps.join("; ")));
        }

        lines.join("\n")
    }
}

/// Result of checking a requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum CheckResult {
    /// The requirement is met.
    AllGood,
    /// The requirement can't be checked because these columns are missing.
    DoesntApply { missing: Vec<String> },
    /// The requirement is not met.
    StillNeeds(Shortfall),
}

impl CheckResult {
    /// Not applicable because of the given missing columns.
    pub fn doesnt_apply(missing: Vec<String>) -> Self {
        debug_assert!(!missing.is_empty());
        CheckResult::DoesntApply { missing }
    }

    pub fn status(&self) -> Status {
        match self {
            CheckResult::AllGood => Status::Pass,
            CheckResult::DoesntApply { .. } => Status::NotApplicable,
            CheckResult::StillNeeds(_) => Status::Fail,
        }
    }

    /// Tri-state success: `Some(true)`, `Some(false)`, or `None` if not applicable.
    pub fn success(&self) -> Option<bool> {
        self.status().success()
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, CheckResult::AllGood)
    }

    pub fn is_fail(&self) -> bool {
        matches!(self, CheckResult::StillNeeds(_))
    }

    pub fn is_not_applicable(&self) -> bool {
        matches!(self, CheckResult::DoesntApply { .. })
    }

    /// Details of a failure.
    pub fn shortfall(&self) -> Option<&Shortfall> {
        match self {
            CheckResult::StillNeeds(shortfall) => Some(shortfall),
            _ => None,
        }
    }

    /// Human-readable, possibly multi-line message.
    pub fn message(&self) -> String {
        match self {
            CheckResult::AllGood => "OK".to_string(),
            CheckResult::DoesntApply { missing } => {
                let reason = match missing.as_slice() {
                    [column] => format!("column '{}' is missing", column),
                    columns => format!("columns {} are missing", quote_list(columns)),
                };
                format!("Doesn't apply because {}.", reason)
            }
            CheckResult::StillNeeds(shortfall) => shortfall.message(),
        }
    }
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// `'a', 'b', 'c'`
pub(crate) fn quote_list<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .map(|s| format!("'{}'", s.as_ref()))
        .collect::<Vec<_>>()
        .join(", ")
}

pub(crate) fn quote_cell(cell: Option<&str>) -> String {
    match cell {
        Some(v) => format!("'{}'", v),
        None => "<absent>".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_shortfall_is_all_good() {
        assert_eq!(Shortfall::new().into_result(), CheckResult::AllGood);
        assert_eq!(
            Shortfall::new().with_missing(Vec::new()).into_result(),
            CheckResult::AllGood
        );
    }

    #[test]
    fn test_status_and_success() {
        assert_eq!(CheckResult::AllGood.success(), Some(true));
        assert_eq!(CheckResult::doesnt_apply(vec!["x".into()]).success(), None);
        let failed = Shortfall::new().with_missing(vec!["x".into()]).into_result();
        assert_eq!(failed.status(), Status::Fail);
        assert_eq!(failed.success(), Some(false));
        assert!(failed.is_fail());
    }

    #[test]
    fn test_rows_are_one_based() {
        let shortfall = Shortfall::new().with_row_indices(vec![0, 2]);
        assert_eq!(shortfall.rows, vec![1, 3]);
    }

    #[test]
    fn test_messages() {
        let msg = |s: Shortfall| s.into_result().message();
        assert!(msg(Shortfall::new().with_missing(vec!["zzz1".into()])).contains("zzz1"));
        assert!(msg(Shortfall::new().with_not_matching(vec!["zzz2".into()])).contains("zzz2"));
        assert!(msg(Shortfall::new().with_row_indices(vec![0])).contains('1'));
        assert!(msg(Shortfall::new().with_not_allowed(vec![Some("zzz3".into())])).contains("zzz3"));
        assert!(
            msg(Shortfall::new().with_repeated(vec![Repeat::new(vec![Some("zzz4".into())], 2)]))
                .contains("zzz4")
        );
    }

    #[test]
    fn test_message_lines_in_order() {
        let shortfall = Shortfall::new()
            .with_missing(vec!["a".into()])
            .with_row_indices(vec![4])
            .with_not_allowed(vec![None]);
        assert_eq!(
            shortfall.message(),
            "Missing: 'a'\nIn rows (starting from 1): 5\nNot allowed: <absent>"
        );
    }

    #[test]
    fn test_repeat_message() {
        let repeat = Repeat::new(vec![Some("m".into()), None], 2);
        assert_eq!(repeat.to_string(), "('m', <absent>) is repeated 2 times");
    }

    #[test]
    fn test_doesnt_apply_message() {
        assert_eq!(
            CheckResult::doesnt_apply(vec!["colz".into()]).message(),
            "Doesn't apply because column 'colz' is missing."
        );
        assert_eq!(
            CheckResult::doesnt_apply(vec!["x".into(), "y".into()]).to_string(),
            "Doesn't apply because columns 'x', 'y' are missing."
        );
        assert_eq!(CheckResult::AllGood.to_string(), "OK");
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_value(
            Shortfall::new().with_row_indices(vec![2]).into_result(),
        )
        .unwrap();
        assert_eq!(json["result"], "still_needs");
        assert_eq!(json["rows"], serde_json::json!([3]));
        assert!(json.get("missing").is_none());
    }
}
