//! Line-oriented feature file parsing.
//!
//! The parser feeds each trimmed line through
//! [`classify_line`](crate::classifier::classify_line) and drives a small
//! state machine that tracks whether it is inside a Scenario Outline or one of
//! its Examples tables. The result is a [`FeatureFileStats`] record.
//!
//! A Scenario Outline contributes nothing to the scenario count by itself;
//! each data row of its Examples tables is one concrete scenario. The first
//! row after `Examples:` is the column header and is never counted.

use std::path::Path;

use serde::Serialize;

use crate::classifier::{LineToken, classify_line};
use crate::error::FeatureReadError;

/// Cursor of the per-file state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseState {
    /// Outside any outline or examples table.
    #[default]
    Default,
    /// After a `Scenario Outline:` line, before its `Examples:`.
    InScenarioOutline,
    /// After `Examples:`, waiting for the column header row.
    InExamplesHeader,
    /// Inside the data rows of an Examples table.
    InExamplesBody,
}

impl ParseState {
    const fn in_examples(self) -> bool {
        matches!(self, Self::InExamplesHeader | Self::InExamplesBody)
    }
}

/// A raw `|`-delimited row captured while parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    /// 1-based line number of the row.
    pub line: usize,
    /// Cells in column order, untrimmed.
    pub cells: Vec<String>,
}

impl TableRow {
    /// 1-based columns whose cell is empty after trimming.
    pub fn empty_columns(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.trim().is_empty())
            .map(|(idx, _)| idx + 1)
    }
}

/// Statistics gathered from one feature file.
///
/// `scenario_count` equals the number of `Scenario:` lines plus the number of
/// non-header Examples rows that belong to a preceding Scenario Outline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureFileStats {
    /// Description from the first `Feature:` line, if any.
    pub feature_description: Option<String>,
    /// Names of scenarios and outlines in source order.
    pub scenario_names: Vec<String>,
    /// Number of concrete scenarios in the file.
    pub scenario_count: usize,
    /// Every table row seen, whether or not it belongs to an outline.
    pub table_rows: Vec<TableRow>,
}

/// Incremental parser for a single feature file.
///
/// Feed lines in order with [`FeatureParser::feed`] and call
/// [`FeatureParser::finish`] to obtain the statistics.
#[derive(Debug, Default)]
pub struct FeatureParser {
    state: ParseState,
    // Set while the latest scenario section is an outline; lets a second
    // Examples block reopen a table after the blank line that closed the
    // first.
    outline_open: bool,
    line_number: usize,
    stats: FeatureFileStats,
}

impl FeatureParser {
    /// Create a parser in the initial state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state machine cursor.
    #[must_use]
    pub fn state(&self) -> ParseState {
        self.state
    }

    /// Consume the next raw line of the file.
    pub fn feed(&mut self, raw: &str) {
        self.line_number += 1;
        let token = classify_line(raw.trim());
        self.apply(token);
    }

    fn apply(&mut self, token: LineToken<'_>) {
        match token {
            LineToken::Feature(description) => {
                if self.stats.feature_description.is_none() {
                    self.stats.feature_description = Some(description.to_owned());
                }
            }
            LineToken::Scenario(name) => {
                self.stats.scenario_count += 1;
                self.stats.scenario_names.push(name.to_owned());
                self.outline_open = false;
                self.state = ParseState::Default;
            }
            LineToken::ScenarioOutline(name) => {
                self.stats.scenario_names.push(name.to_owned());
                self.outline_open = true;
                self.state = ParseState::InScenarioOutline;
            }
            LineToken::Examples => {
                if self.outline_open {
                    self.state = ParseState::InExamplesHeader;
                }
            }
            LineToken::TableRow(cells) => self.table_row(cells),
            LineToken::Blank | LineToken::Other => {
                if self.state.in_examples() {
                    self.state = ParseState::Default;
                }
            }
            LineToken::TagOrComment => {}
        }
    }

    fn table_row(&mut self, cells: Vec<&str>) {
        self.stats.table_rows.push(TableRow {
            line: self.line_number,
            cells: cells.into_iter().map(str::to_owned).collect(),
        });
        match self.state {
            ParseState::InExamplesHeader => self.state = ParseState::InExamplesBody,
            ParseState::InExamplesBody => self.stats.scenario_count += 1,
            ParseState::Default | ParseState::InScenarioOutline => {}
        }
    }

    /// Finish parsing and return the collected statistics.
    #[must_use]
    pub fn finish(self) -> FeatureFileStats {
        self.stats
    }
}

/// Parse feature text that is already in memory.
///
/// Parsing never fails: malformed Gherkin simply contributes fewer tokens.
///
/// # Examples
///
/// ```
/// use feature_audit::parser::parse_feature_source;
///
/// let stats = parse_feature_source(concat!(
///     "Feature: eating\n",
///     "  Scenario Outline: eat <n>\n",
///     "    Examples:\n",
///     "      | n |\n",
///     "      | 1 |\n",
///     "      | 2 |\n",
/// ));
/// assert_eq!(stats.scenario_count, 2);
/// ```
#[must_use]
pub fn parse_feature_source(source: &str) -> FeatureFileStats {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let mut parser = FeatureParser::new();
    for line in source.lines() {
        parser.feed(line);
    }
    parser.finish()
}

/// Read and parse a feature file from disk.
///
/// # Errors
///
/// Returns [`FeatureReadError`] when the file cannot be opened or is not valid
/// UTF-8.
pub fn parse_feature_file(path: &Path) -> Result<FeatureFileStats, FeatureReadError> {
    let source = std::fs::read_to_string(path).map_err(|source| FeatureReadError {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_feature_source(&source))
}

#[cfg(test)]
mod tests;
