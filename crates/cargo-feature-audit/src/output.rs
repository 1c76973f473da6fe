//! Helpers for rendering validation reports.

use std::io::Write;

use eyre::{Context, Result};
use feature_audit::report::{FileSummary, ValidationReport, ViolationKind};

/// Options controlling the human-readable rendering.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct TextOptions {
    /// Print one scenario total per parsed file before the findings.
    pub include_summary: bool,
    /// Whether violations fail the build; changes the closing status line.
    pub fail_on_violations: bool,
}

pub(crate) fn write_text_report(
    writer: &mut dyn Write,
    report: &ValidationReport,
    options: TextOptions,
) -> Result<()> {
    if options.include_summary {
        for file in &report.files {
            write_file_summary(writer, file)?;
        }
    }

    for kind in ViolationKind::ALL {
        let mut group = report.of_kind(kind).peekable();
        if group.peek().is_none() {
            continue;
        }
        writeln!(writer, "{}:", kind.title())
            .wrap_err_with(|| format!("failed to write heading for {kind:?}"))?;
        for violation in group {
            writeln!(writer, "- {violation}")
                .wrap_err_with(|| format!("failed to write violation {}", violation.subject))?;
        }
    }

    write_status_line(writer, report, options.fail_on_violations)
}

fn write_file_summary(writer: &mut dyn Write, file: &FileSummary) -> Result<()> {
    writeln!(
        writer,
        "{} (total scenarios: {})",
        file.path.display(),
        file.scenario_count
    )
    .wrap_err_with(|| format!("failed to write summary for {}", file.path.display()))
}

fn write_status_line(
    writer: &mut dyn Write,
    report: &ValidationReport,
    fail_on_violations: bool,
) -> Result<()> {
    let checked = report.files.len();
    let line = if report.is_empty() {
        format!("feature validation passed: {checked} file(s) checked")
    } else if fail_on_violations {
        format!(
            "feature validation failed: {} violation(s) in {checked} file(s) checked",
            report.len()
        )
    } else {
        format!(
            "feature validation found {} violation(s) in {checked} file(s) checked; not failing the build",
            report.len()
        )
    };
    writeln!(writer, "{line}").wrap_err("failed to write validation status")
}

pub(crate) fn write_json_report(writer: &mut dyn Write, report: &ValidationReport) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, report)
        .wrap_err("failed to serialize validation report to JSON")?;
    writer
        .write_all(b"\n")
        .wrap_err("failed to terminate JSON output with newline")
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use feature_audit::report::Violation;
    use feature_audit::tracker::DuplicateEntry;

    use super::*;

    fn sample_report() -> ValidationReport {
        ValidationReport {
            files: vec![
                FileSummary {
                    path: PathBuf::from("a.feature"),
                    scenario_count: 3,
                },
                FileSummary {
                    path: PathBuf::from("b.feature"),
                    scenario_count: 120,
                },
            ],
            violations: vec![
                Violation::scenario_limit(Path::new("b.feature"), 120, 100),
                Violation::duplicate_feature(DuplicateEntry {
                    key: "Login flow".into(),
                    files: vec![PathBuf::from("a.feature"), PathBuf::from("b.feature")],
                    occurrences: 2,
                }),
            ],
        }
    }

    fn render(report: &ValidationReport, options: TextOptions) -> eyre::Result<String> {
        let mut buffer = Vec::new();
        write_text_report(&mut buffer, report, options)?;
        Ok(String::from_utf8(buffer)?)
    }

    #[test]
    fn groups_violations_under_headings() -> eyre::Result<()> {
        let text = render(
            &sample_report(),
            TextOptions {
                include_summary: false,
                fail_on_violations: true,
            },
        )?;
        assert_eq!(
            text,
            concat!(
                "Scenario count exceeded:\n",
                "- b.feature: 120 scenarios (max allowed: 100)\n",
                "Duplicate feature descriptions:\n",
                "- 'Login flow' in: a.feature, b.feature\n",
                "feature validation failed: 2 violation(s) in 2 file(s) checked\n",
            )
        );
        Ok(())
    }

    #[test]
    fn summary_lists_each_file() -> eyre::Result<()> {
        let text = render(
            &sample_report(),
            TextOptions {
                include_summary: true,
                fail_on_violations: false,
            },
        )?;
        assert!(text.starts_with("a.feature (total scenarios: 3)\nb.feature (total scenarios: 120)\n"));
        assert!(text.ends_with("not failing the build\n"));
        Ok(())
    }

    #[test]
    fn empty_report_passes() -> eyre::Result<()> {
        let text = render(&ValidationReport::default(), TextOptions::default())?;
        assert_eq!(text, "feature validation passed: 0 file(s) checked\n");
        Ok(())
    }

    #[test]
    fn json_report_round_trips_kinds() -> eyre::Result<()> {
        let mut buffer = Vec::new();
        write_json_report(&mut buffer, &sample_report())?;
        let parsed: serde_json::Value = serde_json::from_slice(&buffer)?;
        let first = parsed
            .get("violations")
            .and_then(serde_json::Value::as_array)
            .and_then(|violations| violations.first())
            .ok_or_else(|| eyre::eyre!("missing violations"))?;
        assert_eq!(
            first.get("kind"),
            Some(&serde_json::Value::String("scenario_limit_exceeded".into()))
        );
        assert!(first.get("line").is_none());
        Ok(())
    }
}
