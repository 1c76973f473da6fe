//! Smoke tests for the `cargo feature-audit` subcommand.
#![expect(clippy::expect_used, reason = "CLI tests use explicit panics")]

use std::fs;
use std::path::Path;
use std::process::Output;
use std::str;

use assert_cmd::Command;
use rstest::rstest;
use tempfile::TempDir;

fn write_feature(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(path, content).expect("write feature file");
}

fn audit(root: &Path, extra: &[&str]) -> Output {
    Command::cargo_bin("cargo-feature-audit")
        .expect("binary exists")
        .env_remove("FEATURE_AUDIT_FAIL_ON_VIOLATIONS")
        .env_remove("FEATURE_AUDIT_MAX_SCENARIOS")
        .arg("feature-audit")
        .arg("--root")
        .arg(root)
        .args(extra)
        .output()
        .expect("runs")
}

fn duplicated_tree() -> TempDir {
    let dir = TempDir::new().expect("temp dir");
    write_feature(dir.path(), "a.feature", "Feature: Login flow\n  Scenario: one\n");
    write_feature(dir.path(), "b.feature", "Feature: Login flow\n  Scenario: two\n");
    dir
}

fn stdout(output: &Output) -> &str {
    str::from_utf8(&output.stdout).expect("utf8 stdout")
}

#[test]
fn clean_tree_passes() {
    let dir = TempDir::new().expect("temp dir");
    write_feature(dir.path(), "features/login.feature", "Feature: Login\n  Scenario: ok\n");

    let output = audit(dir.path(), &[]);
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("feature validation passed: 1 file(s) checked"));
}

#[test]
fn duplicate_feature_fails_the_build() {
    let dir = duplicated_tree();

    let output = audit(dir.path(), &[]);
    assert_eq!(output.status.code(), Some(1));
    let text = stdout(&output);
    assert!(text.contains("Duplicate feature descriptions:"));
    assert!(text.contains("'Login flow' in:"));
}

#[test]
fn violations_can_be_reported_without_failing() {
    let dir = duplicated_tree();

    let output = audit(dir.path(), &["--fail-on-violations", "false"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("not failing the build"));
}

#[test]
fn json_output_is_machine_readable() {
    let dir = duplicated_tree();

    let output = audit(dir.path(), &["--format", "json"]);
    assert_eq!(output.status.code(), Some(1));
    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("valid JSON report");
    let violations = report
        .get("violations")
        .and_then(serde_json::Value::as_array)
        .expect("violations array");
    assert_eq!(violations.len(), 1);
}

#[test]
fn summary_lists_scenario_totals() {
    let dir = TempDir::new().expect("temp dir");
    write_feature(
        dir.path(),
        "a.feature",
        "Feature: A\n  Scenario: one\n  Scenario: two\n",
    );

    let output = audit(dir.path(), &["--summary"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("(total scenarios: 2)"));
}

#[test]
fn scenario_ceiling_flag_is_applied() {
    let dir = TempDir::new().expect("temp dir");
    write_feature(
        dir.path(),
        "a.feature",
        "Feature: A\n  Scenario: one\n  Scenario: two\n",
    );

    let output = audit(dir.path(), &["--max-scenarios", "1"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("2 scenarios (max allowed: 1)"));
}

#[rstest]
#[case(&["--log-level", "chatty"])]
#[case(&["--format", "xml"])]
#[case(&["--max-scenarios", "-1"])]
#[case(&["--extension", ""])]
#[case(&["--extension", "."])]
fn invalid_arguments_are_usage_errors(#[case] extra: &[&str]) {
    let dir = TempDir::new().expect("temp dir");

    let output = audit(dir.path(), extra);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn empty_extension_does_not_pass_silently() {
    let dir = duplicated_tree();

    let output = audit(dir.path(), &["--extension", "."]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).is_empty());
}

#[test]
fn invalid_environment_is_a_configuration_error() {
    let dir = TempDir::new().expect("temp dir");

    let output = Command::cargo_bin("cargo-feature-audit")
        .expect("binary exists")
        .env("FEATURE_AUDIT_MAX_SCENARIOS", "lots")
        .arg("feature-audit")
        .arg("--root")
        .arg(dir.path())
        .output()
        .expect("runs");
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    let stderr = str::from_utf8(&output.stderr).expect("utf8 stderr");
    assert!(stderr.contains("FEATURE_AUDIT_MAX_SCENARIOS"));
}

#[test]
fn missing_root_is_not_an_error() {
    let dir = TempDir::new().expect("temp dir");

    let output = audit(&dir.path().join("absent"), &[]);
    assert_eq!(output.status.code(), Some(0));
}
