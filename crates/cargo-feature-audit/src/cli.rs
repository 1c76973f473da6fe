//! Argument parsing and dispatch for the `cargo feature-audit` entrypoint.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Args, Parser, ValueEnum};
use eyre::{Context, Result};
use feature_audit::config::{
    AuditConfig, ConfigOverrides, KeyMatching, LogLevel, parse_extension,
};
use feature_audit::engine::ValidationEngine;
use feature_audit::logging::init_logging;
use tracing::info;

use crate::output::{TextOptions, write_json_report, write_text_report};

/// Cargo subcommand that validates Gherkin feature files before a build.
#[derive(Parser)]
#[command(name = "cargo", bin_name = "cargo")]
pub(crate) enum Cli {
    /// Validate feature files beneath a directory.
    FeatureAudit(AuditArgs),
}

/// Report rendering format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Grouped human-readable listing.
    #[default]
    Text,
    /// The full report as JSON.
    Json,
}

#[derive(Args, Debug)]
#[command(author, version, about)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "each flag maps to one command-line switch"
)]
pub(crate) struct AuditArgs {
    /// Directory to search for feature files.
    #[arg(long, default_value = ".")]
    pub root: PathBuf,
    /// Maximum number of scenarios allowed in one file.
    #[arg(long, value_name = "N")]
    pub max_scenarios: Option<usize>,
    /// Whether violations fail the build (exit status 1).
    #[arg(long, value_name = "BOOL")]
    pub fail_on_violations: Option<bool>,
    /// Compare feature descriptions and scenario names case-insensitively.
    #[arg(long)]
    pub case_insensitive: bool,
    /// Only report names that repeat across different files.
    #[arg(long)]
    pub ignore_same_file_repeats: bool,
    /// Do not scan data tables for empty cells.
    #[arg(long)]
    pub skip_empty_cells: bool,
    /// Feature file extension.
    #[arg(long, value_name = "EXT", value_parser = parse_extension)]
    pub extension: Option<String>,
    /// Additional directory name to skip during discovery.
    #[arg(long = "exclude-dir", value_name = "NAME")]
    pub exclude_dirs: Vec<String>,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Print the scenario total of every parsed file.
    #[arg(long)]
    pub summary: bool,
    /// Log level (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<LogLevel>,
}

impl AuditArgs {
    fn overrides(&self, base: &AuditConfig) -> ConfigOverrides {
        let excluded_dirs = if self.exclude_dirs.is_empty() {
            None
        } else {
            let mut dirs = base.excluded_dirs.clone();
            dirs.extend(self.exclude_dirs.iter().cloned());
            Some(dirs)
        };
        ConfigOverrides {
            scenario_ceiling: self.max_scenarios,
            fail_on_violations: self.fail_on_violations,
            key_matching: self.case_insensitive.then_some(KeyMatching::CaseInsensitive),
            same_file_repeats: self.ignore_same_file_repeats.then_some(false),
            check_empty_cells: self.skip_empty_cells.then_some(false),
            extension: self.extension.clone(),
            excluded_dirs,
            log_level: self.log_level,
        }
    }
}

/// Final result of an audit, mapped to the process exit status by `main`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Outcome {
    /// No violations, or violations that are not configured to fail.
    Passed,
    /// Violations were found and `fail_on_violations` is set.
    Failed,
}

pub(crate) fn run() -> Result<Outcome> {
    let Cli::FeatureAudit(args) = Cli::parse();
    let config = match build_config(&args) {
        Ok(config) => config,
        Err(e) => {
            init_logging(&AuditConfig::default());
            return Err(e);
        }
    };
    init_logging(&config);
    audit(&args, config)
}

fn build_config(args: &AuditArgs) -> Result<AuditConfig> {
    let config = AuditConfig::from_env().wrap_err("failed to load configuration")?;
    let overrides = args.overrides(&config);
    Ok(config.apply_overrides(overrides))
}

fn audit(args: &AuditArgs, config: AuditConfig) -> Result<Outcome> {
    let fail_on_violations = config.fail_on_violations;
    info!(root = %args.root.display(), "validating feature files");
    let report = ValidationEngine::new(config).validate(&args.root);

    let mut stdout = io::stdout().lock();
    match args.format {
        OutputFormat::Text => write_text_report(
            &mut stdout,
            &report,
            TextOptions {
                include_summary: args.summary,
                fail_on_violations,
            },
        )?,
        OutputFormat::Json => write_json_report(&mut stdout, &report)?,
    }
    stdout.flush().wrap_err("failed to flush validation report")?;

    if report.fails_build(fail_on_violations) {
        Ok(Outcome::Failed)
    } else {
        Ok(Outcome::Passed)
    }
}
