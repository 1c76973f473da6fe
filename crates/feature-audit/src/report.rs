//! Validation report produced by a single run.
//!
//! The report is an ordered list of [`Violation`] records plus a per-file
//! summary of scenario totals. It is immutable once the engine returns it;
//! callers decide how to render it and whether a non-empty report should fail
//! the surrounding build.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::FeatureReadError;
use crate::tracker::DuplicateEntry;

/// Category of a validation finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// A candidate file could not be read.
    FileReadError,
    /// A file holds more scenarios than the configured ceiling.
    ScenarioLimitExceeded,
    /// Two or more files declare the same feature description.
    DuplicateFeature,
    /// Two or more scenarios share a name.
    DuplicateScenario,
    /// A table cell is empty after trimming.
    EmptyTableCell,
}

impl ViolationKind {
    /// Kinds in the order they are grouped for display.
    pub const ALL: [Self; 5] = [
        Self::FileReadError,
        Self::ScenarioLimitExceeded,
        Self::DuplicateFeature,
        Self::DuplicateScenario,
        Self::EmptyTableCell,
    ];

    /// Heading used when violations of this kind are listed together.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::FileReadError => "Unreadable feature files",
            Self::ScenarioLimitExceeded => "Scenario count exceeded",
            Self::DuplicateFeature => "Duplicate feature descriptions",
            Self::DuplicateScenario => "Duplicate scenario names",
            Self::EmptyTableCell => "Empty table cells",
        }
    }
}

/// One finding in the validation report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Category of the finding.
    pub kind: ViolationKind,
    /// Offending key (duplicate text) or file path for per-file findings.
    pub subject: String,
    /// Files implicated by the finding.
    pub files: Vec<PathBuf>,
    /// 1-based line, for findings tied to a location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    /// 1-based column, for empty table cells.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
    /// Human-readable description.
    pub message: String,
}

impl Violation {
    /// A file holds more scenarios than allowed.
    #[must_use]
    pub fn scenario_limit(path: &Path, count: usize, ceiling: usize) -> Self {
        Self {
            kind: ViolationKind::ScenarioLimitExceeded,
            subject: path.display().to_string(),
            files: vec![path.to_path_buf()],
            line: None,
            column: None,
            message: format!(
                "{}: {count} scenarios (max allowed: {ceiling})",
                path.display()
            ),
        }
    }

    /// Several files share a feature description.
    #[must_use]
    pub fn duplicate_feature(entry: DuplicateEntry) -> Self {
        Self::duplicate(ViolationKind::DuplicateFeature, entry)
    }

    /// Several scenarios share a name.
    #[must_use]
    pub fn duplicate_scenario(entry: DuplicateEntry) -> Self {
        Self::duplicate(ViolationKind::DuplicateScenario, entry)
    }

    fn duplicate(kind: ViolationKind, entry: DuplicateEntry) -> Self {
        let DuplicateEntry {
            key,
            files,
            occurrences,
        } = entry;
        let listing = files
            .iter()
            .map(|file| file.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let message = if files.len() > 1 {
            format!("'{key}' in: {listing}")
        } else {
            format!("'{key}' appears {occurrences} times in: {listing}")
        };
        Self {
            kind,
            subject: key,
            files,
            line: None,
            column: None,
            message,
        }
    }

    /// A table cell is empty after trimming.
    #[must_use]
    pub fn empty_cell(path: &Path, line: usize, column: usize) -> Self {
        Self {
            kind: ViolationKind::EmptyTableCell,
            subject: path.display().to_string(),
            files: vec![path.to_path_buf()],
            line: Some(line),
            column: Some(column),
            message: format!("{}:{line}: empty cell in column {column}", path.display()),
        }
    }

    /// A candidate file could not be read.
    #[must_use]
    pub fn read_error(error: &FeatureReadError) -> Self {
        Self {
            kind: ViolationKind::FileReadError,
            subject: error.path.display().to_string(),
            files: vec![error.path.clone()],
            line: None,
            column: None,
            message: format!("{}: {}", error.path.display(), error.source),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Scenario total for one successfully parsed file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileSummary {
    /// Path of the parsed file.
    pub path: PathBuf,
    /// Number of concrete scenarios in the file.
    pub scenario_count: usize,
}

/// Complete outcome of a validation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Per-file scenario totals in processing order.
    pub files: Vec<FileSummary>,
    /// Findings in deterministic order.
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    /// Whether the run produced no findings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Number of findings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Findings of a single kind, in report order.
    pub fn of_kind(&self, kind: ViolationKind) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(move |v| v.kind == kind)
    }

    /// Whether the caller should fail the surrounding build.
    #[must_use]
    pub fn fails_build(&self, fail_on_violations: bool) -> bool {
        fail_on_violations && !self.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(files: &[&str], occurrences: usize) -> DuplicateEntry {
        DuplicateEntry {
            key: "Login flow".to_owned(),
            files: files.iter().map(PathBuf::from).collect(),
            occurrences,
        }
    }

    #[test]
    fn duplicate_message_lists_files() {
        let violation = Violation::duplicate_feature(entry(&["a.feature", "b.feature"], 2));
        assert_eq!(violation.kind, ViolationKind::DuplicateFeature);
        assert_eq!(violation.subject, "Login flow");
        assert_eq!(violation.to_string(), "'Login flow' in: a.feature, b.feature");
    }

    #[test]
    fn same_file_repeat_message_counts_occurrences() {
        let violation = Violation::duplicate_scenario(entry(&["a.feature"], 3));
        assert_eq!(
            violation.to_string(),
            "'Login flow' appears 3 times in: a.feature"
        );
    }

    #[test]
    fn scenario_limit_message_names_count_and_ceiling() {
        let violation = Violation::scenario_limit(Path::new("big.feature"), 101, 100);
        assert_eq!(
            violation.to_string(),
            "big.feature: 101 scenarios (max allowed: 100)"
        );
    }

    #[test]
    fn empty_cell_carries_location() {
        let violation = Violation::empty_cell(Path::new("t.feature"), 12, 2);
        assert_eq!(violation.line, Some(12));
        assert_eq!(violation.column, Some(2));
        assert_eq!(violation.to_string(), "t.feature:12: empty cell in column 2");
    }

    #[test]
    fn build_fails_only_when_flagged_and_non_empty() {
        let empty = ValidationReport::default();
        assert!(!empty.fails_build(true));

        let report = ValidationReport {
            files: Vec::new(),
            violations: vec![Violation::empty_cell(Path::new("t.feature"), 1, 1)],
        };
        assert!(report.fails_build(true));
        assert!(!report.fails_build(false));
        assert_eq!(report.of_kind(ViolationKind::EmptyTableCell).count(), 1);
        assert_eq!(report.of_kind(ViolationKind::DuplicateFeature).count(), 0);
    }

    #[test]
    fn kinds_serialise_in_snake_case() {
        let json = serde_json::to_string(&ViolationKind::ScenarioLimitExceeded)
            .unwrap_or_default();
        assert_eq!(json, "\"scenario_limit_exceeded\"");
    }
}
