//! Line classification for the keyword subset the validator understands.
//!
//! Each trimmed line maps to exactly one [`LineToken`]. Rules are checked in a
//! fixed order; `Scenario Outline:` must be tested before `Scenario:` because
//! the shorter keyword is a prefix of the longer one.

const FEATURE: &str = "Feature:";
const SCENARIO_OUTLINE: &str = "Scenario Outline:";
const SCENARIO: &str = "Scenario:";
const EXAMPLES: &str = "Examples:";

/// Semantic token for a single line of a feature file.
///
/// Payloads borrow from the classified line. Keyword payloads are trimmed;
/// table cells are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineToken<'a> {
    /// `Feature:` with its description.
    Feature(&'a str),
    /// `Scenario:` with its name.
    Scenario(&'a str),
    /// `Scenario Outline:` with its name.
    ScenarioOutline(&'a str),
    /// `Examples:` heading.
    Examples,
    /// A `|`-delimited table row and its cells.
    TableRow(Vec<&'a str>),
    /// A `#` comment or `@` tag line.
    TagOrComment,
    /// An empty line.
    Blank,
    /// Anything else (steps, free text, unsupported keywords).
    Other,
}

/// Classify a line that has already been stripped of surrounding whitespace.
///
/// The classifier performs no validation of payload content: `Feature:` with
/// nothing after it yields `LineToken::Feature("")`.
///
/// # Examples
///
/// ```
/// use feature_audit::classifier::{LineToken, classify_line};
///
/// assert_eq!(
///     classify_line("Scenario Outline: eating"),
///     LineToken::ScenarioOutline("eating"),
/// );
/// assert_eq!(
///     classify_line("| a | |"),
///     LineToken::TableRow(vec![" a ", " "]),
/// );
/// assert_eq!(classify_line("@smoke"), LineToken::TagOrComment);
/// ```
#[must_use]
pub fn classify_line(line: &str) -> LineToken<'_> {
    if line.is_empty() {
        return LineToken::Blank;
    }
    if line.starts_with('#') || line.starts_with('@') {
        return LineToken::TagOrComment;
    }
    if let Some(rest) = line.strip_prefix(FEATURE) {
        return LineToken::Feature(rest.trim());
    }
    if let Some(rest) = line.strip_prefix(SCENARIO_OUTLINE) {
        return LineToken::ScenarioOutline(rest.trim());
    }
    if let Some(rest) = line.strip_prefix(SCENARIO) {
        return LineToken::Scenario(rest.trim());
    }
    if line.starts_with(EXAMPLES) {
        return LineToken::Examples;
    }
    table_cells(line).map_or(LineToken::Other, LineToken::TableRow)
}

/// Split a `|`-delimited row into cells, discarding the two outer fragments.
///
/// Returns `None` unless the line both starts and ends with a pipe. A lone
/// `|` does not qualify.
fn table_cells(line: &str) -> Option<Vec<&str>> {
    let inner = line.strip_prefix('|')?.strip_suffix('|')?;
    Some(inner.split('|').collect())
}
