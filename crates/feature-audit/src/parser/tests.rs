//! Tests for the feature file state machine.

use rstest::rstest;
use tempfile::TempDir;

use super::*;

#[test]
fn counts_plain_scenarios_and_records_names() {
    let stats = parse_feature_source(concat!(
        "@auth\n",
        "Feature: Login flow\n",
        "\n",
        "  # happy path first\n",
        "  Scenario: Valid credentials\n",
        "    Given a registered user\n",
        "    When they log in\n",
        "    Then the dashboard is shown\n",
        "\n",
        "  Scenario: Submit empty form\n",
        "    When the form is submitted\n",
    ));

    assert_eq!(stats.feature_description.as_deref(), Some("Login flow"));
    assert_eq!(
        stats.scenario_names,
        vec!["Valid credentials", "Submit empty form"]
    );
    assert_eq!(stats.scenario_count, 2);
    assert!(stats.table_rows.is_empty());
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(5)]
fn outline_counts_only_example_data_rows(#[case] rows: usize) {
    let mut source = String::from(concat!(
        "Feature: eating\n",
        "  Scenario Outline: eat <eat> of <start>\n",
        "    Given there are <start> cucumbers\n",
        "\n",
        "    Examples:\n",
        "      | start | eat |\n",
    ));
    for row in 0..rows {
        source.push_str(&format!("      | {row} | 1 |\n"));
    }

    let stats = parse_feature_source(&source);
    assert_eq!(stats.scenario_count, rows);
    assert_eq!(stats.scenario_names, vec!["eat <eat> of <start>"]);
    assert_eq!(stats.table_rows.len(), rows + 1);
}

#[test]
fn outline_without_examples_contributes_nothing() {
    let stats = parse_feature_source(concat!(
        "Feature: drafts\n",
        "  Scenario Outline: not yet parametrised\n",
        "    Given <thing>\n",
        "  Scenario: concrete\n",
    ));
    assert_eq!(stats.scenario_count, 1);
    assert_eq!(stats.scenario_names.len(), 2);
}

#[test]
fn header_detection_does_not_depend_on_column_names() {
    let stats = parse_feature_source(concat!(
        "Feature: naming\n",
        "  Scenario Outline: o\n",
        "    Examples:\n",
        "      | example name | value |\n",
        "      | name one     | 1     |\n",
        "      | example two  | 2     |\n",
    ));
    assert_eq!(stats.scenario_count, 2);
}

#[test]
fn blank_line_closes_examples_table() {
    let stats = parse_feature_source(concat!(
        "Feature: tables\n",
        "  Scenario Outline: o\n",
        "    Examples:\n",
        "      | a |\n",
        "      | 1 |\n",
        "\n",
        "  Scenario: s\n",
        "    Given a table\n",
        "      | x |\n",
        "      | y |\n",
    ));
    assert_eq!(stats.scenario_count, 2);
    assert_eq!(stats.table_rows.len(), 4);
}

#[test]
fn step_line_closes_examples_table() {
    let mut parser = FeatureParser::new();
    for line in [
        "Scenario Outline: o",
        "Examples:",
        "| a |",
        "| 1 |",
        "Given stray text",
        "| 2 |",
    ] {
        parser.feed(line);
    }
    assert_eq!(parser.state(), ParseState::Default);
    assert_eq!(parser.finish().scenario_count, 1);
}

#[test]
fn tags_and_comments_do_not_leave_examples_table() {
    let stats = parse_feature_source(concat!(
        "Feature: tagged\n",
        "  Scenario Outline: o\n",
        "    @fast\n",
        "    Examples:\n",
        "      | a |\n",
        "      # first\n",
        "      | 1 |\n",
        "      | 2 |\n",
    ));
    assert_eq!(stats.scenario_count, 2);
}

#[test]
fn every_examples_block_of_an_outline_is_counted() {
    let stats = parse_feature_source(concat!(
        "Feature: multi\n",
        "  Scenario Outline: o\n",
        "    Given <a>\n",
        "\n",
        "    Examples: first\n",
        "      | a |\n",
        "      | 1 |\n",
        "\n",
        "    Examples: second\n",
        "      | a |\n",
        "      | 2 |\n",
        "      | 3 |\n",
    ));
    assert_eq!(stats.scenario_count, 3);
}

#[test]
fn examples_after_plain_scenario_are_ignored() {
    let stats = parse_feature_source(concat!(
        "Feature: misplaced\n",
        "  Scenario: s\n",
        "    Examples:\n",
        "      | a |\n",
        "      | 1 |\n",
    ));
    assert_eq!(stats.scenario_count, 1);
    assert_eq!(stats.table_rows.len(), 2);
}

#[test]
fn only_first_feature_description_is_kept() {
    let stats = parse_feature_source("Feature: first\nFeature: second\n");
    assert_eq!(stats.feature_description.as_deref(), Some("first"));
}

#[test]
fn state_machine_follows_outline_sections() {
    let mut parser = FeatureParser::new();
    assert_eq!(parser.state(), ParseState::Default);
    parser.feed("  Scenario Outline: o");
    assert_eq!(parser.state(), ParseState::InScenarioOutline);
    parser.feed("");
    assert_eq!(parser.state(), ParseState::InScenarioOutline);
    parser.feed("  Examples:");
    assert_eq!(parser.state(), ParseState::InExamplesHeader);
    parser.feed("  | a |");
    assert_eq!(parser.state(), ParseState::InExamplesBody);
    parser.feed("  | 1 |");
    assert_eq!(parser.state(), ParseState::InExamplesBody);
    parser.feed("  Scenario: s");
    assert_eq!(parser.state(), ParseState::Default);
}

#[expect(clippy::expect_used, reason = "tests use explicit failures for clarity")]
#[test]
fn table_rows_record_line_numbers_and_empty_columns() {
    let stats = parse_feature_source(concat!(
        "Feature: cells\n",
        "  Scenario: s\n",
        "    Given users\n",
        "      | username | |\n",
    ));
    let row = stats.table_rows.first().expect("one table row");
    assert_eq!(row.line, 4);
    assert_eq!(row.empty_columns().collect::<Vec<_>>(), vec![2]);
}

#[test]
fn windows_line_endings_and_bom_are_tolerated() {
    let stats = parse_feature_source("\u{feff}Feature: crlf\r\n  Scenario: s\r\n");
    assert_eq!(stats.feature_description.as_deref(), Some("crlf"));
    assert_eq!(stats.scenario_count, 1);
}

#[expect(clippy::expect_used, reason = "tests use explicit failures for clarity")]
#[test]
fn parses_file_from_disk() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("demo.feature");
    std::fs::write(&path, "Feature: demo\n  Scenario: one\n").expect("write feature file");

    let stats = parse_feature_file(&path).expect("parse feature file");
    assert_eq!(stats.scenario_count, 1);
}

#[expect(clippy::expect_used, reason = "tests use explicit failures for clarity")]
#[test]
fn missing_file_is_a_read_error() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("absent.feature");

    let err = parse_feature_file(&path).expect_err("missing file should fail");
    assert_eq!(err.path, path);
}

#[expect(clippy::expect_used, reason = "tests use explicit failures for clarity")]
#[test]
fn non_utf8_file_is_a_read_error() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("binary.feature");
    std::fs::write(&path, [0xff_u8, 0xfe, 0x00]).expect("write bytes");

    assert!(parse_feature_file(&path).is_err());
}
