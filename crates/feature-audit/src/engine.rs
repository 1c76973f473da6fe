//! Validation orchestration.
//!
//! [`ValidationEngine::validate`] discovers candidate files, parses each one
//! independently, checks the scenario ceiling and table cells per file, feeds
//! the duplicate tracker, and finally emits one violation per duplicate key.
//! A file that cannot be read becomes a single `FileReadError` entry and is
//! left out of every other check; the remaining files are still analysed.
//!
//! Report order is deterministic: files are processed in sorted path order,
//! per-file findings come first, then duplicate features, then duplicate
//! scenarios, each in sorted key order.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::AuditConfig;
use crate::discovery::{FeatureDiscovery, WalkDirDiscovery};
use crate::parser::{FeatureFileStats, parse_feature_file};
use crate::report::{FileSummary, ValidationReport, Violation};
use crate::tracker::DuplicateTracker;

/// Runs the full validation pipeline over a directory tree.
#[derive(Debug, Clone)]
pub struct ValidationEngine<D = WalkDirDiscovery> {
    config: AuditConfig,
    discovery: D,
}

impl ValidationEngine<WalkDirDiscovery> {
    /// Create an engine that discovers files with [`WalkDirDiscovery`].
    #[must_use]
    pub fn new(config: AuditConfig) -> Self {
        let discovery = WalkDirDiscovery::from_config(&config);
        Self { config, discovery }
    }
}

impl<D: FeatureDiscovery> ValidationEngine<D> {
    /// Create an engine with a custom discovery collaborator.
    #[must_use]
    pub fn with_discovery(config: AuditConfig, discovery: D) -> Self {
        Self { config, discovery }
    }

    /// Validate every feature file beneath `root`.
    ///
    /// A missing root is treated as an empty corpus. The engine never
    /// terminates the process; callers inspect the returned report.
    #[must_use]
    pub fn validate(&self, root: &Path) -> ValidationReport {
        let files = self.discovery.discover(root);
        self.validate_files(files)
    }

    /// Validate an explicit list of feature files.
    #[must_use]
    pub fn validate_files(&self, mut files: Vec<PathBuf>) -> ValidationReport {
        files.sort();
        files.dedup();

        let mut run = ValidationRun::new(&self.config);
        for path in &files {
            let stats = match parse_feature_file(path) {
                Ok(stats) => stats,
                Err(err) => {
                    warn!(error = %err, "feature file excluded from validation");
                    run.report.violations.push(Violation::read_error(&err));
                    continue;
                }
            };
            run.check_file(path, &stats);
        }
        let report = run.finish();

        info!(
            files = files.len(),
            violations = report.len(),
            "feature validation finished"
        );
        report
    }
}

/// State for one validation run; discarded once the report is produced.
struct ValidationRun<'a> {
    config: &'a AuditConfig,
    tracker: DuplicateTracker,
    report: ValidationReport,
}

impl<'a> ValidationRun<'a> {
    fn new(config: &'a AuditConfig) -> Self {
        Self {
            config,
            tracker: DuplicateTracker::new(config.key_matching, config.same_file_repeats),
            report: ValidationReport::default(),
        }
    }

    fn check_file(&mut self, path: &Path, stats: &FeatureFileStats) {
        debug!(
            file = %path.display(),
            scenarios = stats.scenario_count,
            "parsed feature file"
        );
        self.report.files.push(FileSummary {
            path: path.to_path_buf(),
            scenario_count: stats.scenario_count,
        });

        if stats.scenario_count > self.config.scenario_ceiling {
            self.report.violations.push(Violation::scenario_limit(
                path,
                stats.scenario_count,
                self.config.scenario_ceiling,
            ));
        }

        if self.config.check_empty_cells {
            for row in &stats.table_rows {
                self.report.violations.extend(
                    row.empty_columns()
                        .map(|column| Violation::empty_cell(path, row.line, column)),
                );
            }
        }

        self.tracker.record_file(path, stats);
    }

    fn finish(mut self) -> ValidationReport {
        self.report.violations.extend(
            self.tracker
                .duplicate_features()
                .into_iter()
                .map(Violation::duplicate_feature),
        );
        self.report.violations.extend(
            self.tracker
                .duplicate_scenarios()
                .into_iter()
                .map(Violation::duplicate_scenario),
        );
        self.report
    }
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "tests require explicit panic messages for debugging failures"
)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::report::ViolationKind;

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).expect("write feature file");
        path
    }

    #[test]
    fn empty_discovery_yields_empty_report() {
        let nothing = |_: &Path| -> Vec<PathBuf> { Vec::new() };
        let engine = ValidationEngine::with_discovery(AuditConfig::default(), nothing);
        let report = engine.validate(Path::new("anywhere"));
        assert!(report.is_empty());
        assert!(report.files.is_empty());
    }

    #[test]
    fn ceiling_is_exclusive() {
        let dir = TempDir::new().expect("temp dir");
        let at = write(&dir, "at.feature", "Scenario: a\nScenario: b\n");
        let over = write(&dir, "over.feature", "Scenario: c\nScenario: d\nScenario: e\n");

        let engine = ValidationEngine::new(AuditConfig::default().with_scenario_ceiling(2));
        let report = engine.validate_files(vec![over.clone(), at]);

        let limits: Vec<_> = report
            .of_kind(ViolationKind::ScenarioLimitExceeded)
            .collect();
        assert_eq!(limits.len(), 1);
        assert_eq!(
            limits.first().map(|v| v.files.clone()),
            Some(vec![over])
        );
    }

    #[test]
    fn empty_cell_check_can_be_disabled() {
        let dir = TempDir::new().expect("temp dir");
        let path = write(&dir, "t.feature", "Scenario: s\n  Given\n    | a | |\n");

        let mut config = AuditConfig::default();
        config.check_empty_cells = false;
        let report = ValidationEngine::new(config).validate_files(vec![path]);
        assert!(report.is_empty());
    }

    #[test]
    fn unreadable_file_is_reported_and_excluded() {
        let dir = TempDir::new().expect("temp dir");
        let good = write(&dir, "good.feature", "Feature: F\nScenario: s\n");
        let missing = dir.path().join("missing.feature");

        let report =
            ValidationEngine::new(AuditConfig::default()).validate_files(vec![missing, good]);
        assert_eq!(report.len(), 1);
        assert_eq!(report.of_kind(ViolationKind::FileReadError).count(), 1);
        assert_eq!(report.files.len(), 1);
    }

    #[test]
    fn duplicate_paths_are_validated_once() {
        let dir = TempDir::new().expect("temp dir");
        let path = write(&dir, "once.feature", "Feature: F\nScenario: s\n");

        let report =
            ValidationEngine::new(AuditConfig::default()).validate_files(vec![path.clone(), path]);
        assert!(report.is_empty());
        assert_eq!(report.files.len(), 1);
    }

    #[test]
    fn per_file_findings_precede_duplicates() {
        let dir = TempDir::new().expect("temp dir");
        let a = write(&dir, "a.feature", "Feature: Same\nScenario: s\n  | |\n");
        let b = write(&dir, "b.feature", "Feature: Same\n");

        let report = ValidationEngine::new(AuditConfig::default()).validate_files(vec![b, a]);
        let kinds: Vec<_> = report.violations.iter().map(|v| v.kind).collect();
        assert_eq!(
            kinds,
            vec![ViolationKind::EmptyTableCell, ViolationKind::DuplicateFeature]
        );
    }
}
