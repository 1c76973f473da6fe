//! Validation configuration parsed from environment variables.
//!
//! Every setting has a default and can be overridden through an environment
//! variable prefixed with `FEATURE_AUDIT_`. Command-line front ends layer
//! their own values on top via [`AuditConfig::apply_overrides`].

use std::env;
use std::str::FromStr;

use crate::error::AuditError;

/// Default ceiling for scenarios in a single feature file.
pub const DEFAULT_SCENARIO_CEILING: usize = 100;

/// Default feature file extension (without the leading dot).
pub const DEFAULT_EXTENSION: &str = "feature";

/// Directory names skipped during discovery unless configured otherwise.
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &[
    "target",
    "build",
    "out",
    ".git",
    ".hg",
    ".svn",
    "node_modules",
    "vendor",
];

const ENV_MAX_SCENARIOS: &str = "FEATURE_AUDIT_MAX_SCENARIOS";
const ENV_FAIL_ON_VIOLATIONS: &str = "FEATURE_AUDIT_FAIL_ON_VIOLATIONS";
const ENV_CASE_INSENSITIVE: &str = "FEATURE_AUDIT_CASE_INSENSITIVE";
const ENV_SAME_FILE_REPEATS: &str = "FEATURE_AUDIT_SAME_FILE_REPEATS";
const ENV_CHECK_EMPTY_CELLS: &str = "FEATURE_AUDIT_CHECK_EMPTY_CELLS";
const ENV_EXTENSION: &str = "FEATURE_AUDIT_EXTENSION";
const ENV_EXCLUDE_DIRS: &str = "FEATURE_AUDIT_EXCLUDE_DIRS";
const ENV_LOG_LEVEL: &str = "FEATURE_AUDIT_LOG_LEVEL";

/// Log level enumeration matching tracing crate levels.
///
/// Defaults to `Warn` so a clean run stays quiet on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Most verbose logging, includes all trace spans.
    Trace,
    /// Debug-level information, including per-file scenario totals.
    Debug,
    /// Run summaries.
    Info,
    /// Unreadable files and missing roots.
    #[default]
    Warn,
    /// Error messages for failures.
    Error,
}

impl FromStr for LogLevel {
    type Err = AuditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(AuditError::InvalidConfig(format!(
                "unknown log level '{s}', expected one of: trace, debug, info, warn, error"
            ))),
        }
    }
}

impl LogLevel {
    /// Convert to a tracing filter directive string.
    #[must_use]
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// How feature descriptions and scenario names are compared for duplicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyMatching {
    /// Keys must match character for character.
    #[default]
    Exact,
    /// Keys are folded to lower case before comparison.
    CaseInsensitive,
}

impl KeyMatching {
    /// Produce the index key for `text` under this matching mode.
    #[must_use]
    pub fn normalise(self, text: &str) -> String {
        match self {
            Self::Exact => text.to_owned(),
            Self::CaseInsensitive => text.to_lowercase(),
        }
    }
}

/// Configuration for a validation run.
///
/// # Environment Variables
///
/// - `FEATURE_AUDIT_MAX_SCENARIOS`: scenario ceiling per file
/// - `FEATURE_AUDIT_FAIL_ON_VIOLATIONS`: whether violations fail the build
/// - `FEATURE_AUDIT_CASE_INSENSITIVE`: fold duplicate keys to lower case
/// - `FEATURE_AUDIT_SAME_FILE_REPEATS`: report names repeated within one file
/// - `FEATURE_AUDIT_CHECK_EMPTY_CELLS`: scan tables for empty cells
/// - `FEATURE_AUDIT_EXTENSION`: feature file extension
/// - `FEATURE_AUDIT_EXCLUDE_DIRS`: comma-separated directory names to skip
/// - `FEATURE_AUDIT_LOG_LEVEL`: trace, debug, info, warn or error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditConfig {
    /// Maximum number of scenarios allowed in one file.
    pub scenario_ceiling: usize,
    /// Whether a non-empty report should fail the surrounding build.
    pub fail_on_violations: bool,
    /// Comparison mode for duplicate keys.
    pub key_matching: KeyMatching,
    /// Whether a name repeated inside a single file counts as a duplicate.
    pub same_file_repeats: bool,
    /// Whether table rows are scanned for empty cells.
    pub check_empty_cells: bool,
    /// Feature file extension, without the leading dot.
    pub extension: String,
    /// Directory names pruned during discovery.
    pub excluded_dirs: Vec<String>,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: LogLevel,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            scenario_ceiling: DEFAULT_SCENARIO_CEILING,
            fail_on_violations: true,
            key_matching: KeyMatching::default(),
            same_file_repeats: true,
            check_empty_cells: true,
            extension: DEFAULT_EXTENSION.to_owned(),
            excluded_dirs: DEFAULT_EXCLUDED_DIRS
                .iter()
                .map(|dir| (*dir).to_owned())
                .collect(),
            log_level: LogLevel::default(),
        }
    }
}

/// Optional values that take precedence over environment-derived settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// Replacement scenario ceiling.
    pub scenario_ceiling: Option<usize>,
    /// Replacement fail-on-violations flag.
    pub fail_on_violations: Option<bool>,
    /// Replacement key matching mode.
    pub key_matching: Option<KeyMatching>,
    /// Replacement same-file repeat policy.
    pub same_file_repeats: Option<bool>,
    /// Replacement empty-cell check flag.
    pub check_empty_cells: Option<bool>,
    /// Replacement feature file extension.
    pub extension: Option<String>,
    /// Replacement excluded directory list.
    pub excluded_dirs: Option<Vec<String>>,
    /// Replacement log level.
    pub log_level: Option<LogLevel>,
}

impl AuditConfig {
    /// Load configuration from the process environment.
    ///
    /// Falls back to defaults for missing variables.
    ///
    /// # Errors
    ///
    /// Returns `AuditError::InvalidConfig` if an environment variable contains
    /// an invalid value.
    pub fn from_env() -> Result<Self, AuditError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `AuditError::InvalidConfig` if a looked-up value is invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AuditError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(val) = lookup(ENV_MAX_SCENARIOS) {
            config.scenario_ceiling = val.trim().parse().map_err(|_| {
                AuditError::InvalidConfig(format!(
                    "invalid {ENV_MAX_SCENARIOS} value '{val}', expected a non-negative integer"
                ))
            })?;
        }
        if let Some(val) = lookup(ENV_FAIL_ON_VIOLATIONS) {
            config.fail_on_violations = parse_flag(ENV_FAIL_ON_VIOLATIONS, &val)?;
        }
        if let Some(val) = lookup(ENV_CASE_INSENSITIVE) {
            config.key_matching = if parse_flag(ENV_CASE_INSENSITIVE, &val)? {
                KeyMatching::CaseInsensitive
            } else {
                KeyMatching::Exact
            };
        }
        if let Some(val) = lookup(ENV_SAME_FILE_REPEATS) {
            config.same_file_repeats = parse_flag(ENV_SAME_FILE_REPEATS, &val)?;
        }
        if let Some(val) = lookup(ENV_CHECK_EMPTY_CELLS) {
            config.check_empty_cells = parse_flag(ENV_CHECK_EMPTY_CELLS, &val)?;
        }
        if let Some(val) = lookup(ENV_EXTENSION) {
            config.extension = parse_extension(&val).map_err(|_| {
                AuditError::InvalidConfig(format!(
                    "invalid {ENV_EXTENSION} value '{val}', expected a file extension"
                ))
            })?;
        }
        if let Some(val) = lookup(ENV_EXCLUDE_DIRS) {
            config.excluded_dirs = val
                .split(',')
                .map(str::trim)
                .filter(|dir| !dir.is_empty())
                .map(str::to_owned)
                .collect();
        }
        if let Some(val) = lookup(ENV_LOG_LEVEL) {
            config.log_level = val.parse()?;
        }

        Ok(config)
    }

    /// Apply optional overrides to an existing configuration.
    ///
    /// Intended for CLI values that should take precedence over
    /// environment-based defaults.
    #[must_use]
    pub fn apply_overrides(mut self, overrides: ConfigOverrides) -> Self {
        let ConfigOverrides {
            scenario_ceiling,
            fail_on_violations,
            key_matching,
            same_file_repeats,
            check_empty_cells,
            extension,
            excluded_dirs,
            log_level,
        } = overrides;

        if let Some(ceiling) = scenario_ceiling {
            self.scenario_ceiling = ceiling;
        }
        if let Some(fail) = fail_on_violations {
            self.fail_on_violations = fail;
        }
        if let Some(matching) = key_matching {
            self.key_matching = matching;
        }
        if let Some(repeats) = same_file_repeats {
            self.same_file_repeats = repeats;
        }
        if let Some(check) = check_empty_cells {
            self.check_empty_cells = check;
        }
        if let Some(ext) = extension {
            self.extension = ext.trim_start_matches('.').to_owned();
        }
        if let Some(dirs) = excluded_dirs {
            self.excluded_dirs = dirs;
        }
        if let Some(level) = log_level {
            self.log_level = level;
        }

        self
    }

    /// Create a new configuration with the specified log level.
    #[must_use]
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    /// Create a new configuration with the specified scenario ceiling.
    #[must_use]
    pub fn with_scenario_ceiling(mut self, ceiling: usize) -> Self {
        self.scenario_ceiling = ceiling;
        self
    }

    /// Create a new configuration with the specified key matching mode.
    #[must_use]
    pub fn with_key_matching(mut self, matching: KeyMatching) -> Self {
        self.key_matching = matching;
        self
    }
}

fn parse_flag(var: &str, value: &str) -> Result<bool, AuditError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(AuditError::InvalidConfig(format!(
            "invalid {var} value '{value}', expected true or false"
        ))),
    }
}

/// Normalise a feature file extension, dropping surrounding whitespace and
/// any leading dots.
///
/// # Errors
///
/// Returns `AuditError::InvalidConfig` when nothing is left after
/// normalisation.
pub fn parse_extension(value: &str) -> Result<String, AuditError> {
    let ext = value.trim().trim_start_matches('.');
    if ext.is_empty() {
        return Err(AuditError::InvalidConfig(format!(
            "invalid extension '{value}', expected a file extension such as 'feature'"
        )));
    }
    Ok(ext.to_owned())
}

#[cfg(test)]
#[expect(
    clippy::unwrap_used,
    reason = "tests require explicit panic messages for debugging failures"
)]
mod tests {
    use std::collections::HashMap;

    use rstest::rstest;

    use super::*;

    fn load(pairs: &[(&str, &str)]) -> Result<AuditConfig, AuditError> {
        let vars: HashMap<&str, &str> = pairs.iter().copied().collect();
        AuditConfig::from_lookup(|key| vars.get(key).map(|v| (*v).to_owned()))
    }

    #[rstest]
    #[case("trace", LogLevel::Trace)]
    #[case("debug", LogLevel::Debug)]
    #[case("INFO", LogLevel::Info)]
    #[case("warning", LogLevel::Warn)]
    #[case("Error", LogLevel::Error)]
    fn log_level_parses_case_insensitively(#[case] input: &str, #[case] expected: LogLevel) {
        assert_eq!(input.parse::<LogLevel>().ok(), Some(expected));
    }

    #[test]
    fn log_level_rejects_invalid_values() {
        let result = "loud".parse::<LogLevel>();
        assert!(result.unwrap_err().to_string().contains("unknown log level"));
    }

    #[test]
    fn default_values() {
        let config = AuditConfig::default();
        assert_eq!(config.scenario_ceiling, 100);
        assert!(config.fail_on_violations);
        assert_eq!(config.key_matching, KeyMatching::Exact);
        assert!(config.same_file_repeats);
        assert!(config.check_empty_cells);
        assert_eq!(config.extension, "feature");
        assert!(config.excluded_dirs.iter().any(|dir| dir == "target"));
        assert!(config.excluded_dirs.iter().any(|dir| dir == ".git"));
        assert_eq!(config.log_level, LogLevel::Warn);
    }

    #[test]
    fn empty_lookup_yields_defaults() {
        let config = AuditConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, AuditConfig::default());
    }

    #[test]
    fn lookup_values_replace_defaults() {
        let config = load(&[
            ("FEATURE_AUDIT_MAX_SCENARIOS", "25"),
            ("FEATURE_AUDIT_FAIL_ON_VIOLATIONS", "no"),
            ("FEATURE_AUDIT_CASE_INSENSITIVE", "TRUE"),
            ("FEATURE_AUDIT_SAME_FILE_REPEATS", "0"),
            ("FEATURE_AUDIT_CHECK_EMPTY_CELLS", "off"),
            ("FEATURE_AUDIT_EXTENSION", ".story"),
            ("FEATURE_AUDIT_EXCLUDE_DIRS", "target, dist ,,"),
            ("FEATURE_AUDIT_LOG_LEVEL", "debug"),
        ])
        .unwrap();

        assert_eq!(config.scenario_ceiling, 25);
        assert!(!config.fail_on_violations);
        assert_eq!(config.key_matching, KeyMatching::CaseInsensitive);
        assert!(!config.same_file_repeats);
        assert!(!config.check_empty_cells);
        assert_eq!(config.extension, "story");
        assert_eq!(config.excluded_dirs, vec!["target", "dist"]);
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[rstest]
    #[case("FEATURE_AUDIT_MAX_SCENARIOS", "-3")]
    #[case("FEATURE_AUDIT_MAX_SCENARIOS", "many")]
    #[case("FEATURE_AUDIT_FAIL_ON_VIOLATIONS", "maybe")]
    #[case("FEATURE_AUDIT_EXTENSION", " . ")]
    #[case("FEATURE_AUDIT_LOG_LEVEL", "chatty")]
    fn invalid_lookup_values_are_rejected(#[case] key: &str, #[case] value: &str) {
        let err = load(&[(key, value)]).unwrap_err();
        assert!(matches!(err, AuditError::InvalidConfig(_)));
    }

    #[test]
    fn overrides_take_precedence() {
        let config = AuditConfig::default().apply_overrides(ConfigOverrides {
            scenario_ceiling: Some(7),
            fail_on_violations: Some(false),
            extension: Some(".feat".to_owned()),
            log_level: Some(LogLevel::Error),
            ..ConfigOverrides::default()
        });
        assert_eq!(config.scenario_ceiling, 7);
        assert!(!config.fail_on_violations);
        assert_eq!(config.extension, "feat");
        assert_eq!(config.log_level, LogLevel::Error);
        assert!(config.check_empty_cells);

        let untouched = AuditConfig::default().apply_overrides(ConfigOverrides::default());
        assert_eq!(untouched, AuditConfig::default());
    }

    #[rstest]
    #[case("feature", "feature")]
    #[case(".story", "story")]
    #[case(" ..feat ", "feat")]
    fn extensions_are_normalised(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(parse_extension(input).unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case(".")]
    #[case("  ")]
    fn empty_extensions_are_rejected(#[case] input: &str) {
        assert!(matches!(
            parse_extension(input),
            Err(AuditError::InvalidConfig(_))
        ));
    }

    #[test]
    fn case_insensitive_matching_folds_keys() {
        assert_eq!(KeyMatching::Exact.normalise("Login Flow"), "Login Flow");
        assert_eq!(
            KeyMatching::CaseInsensitive.normalise("Login Flow"),
            "login flow"
        );
    }
}
