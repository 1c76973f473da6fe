//! Cargo subcommand that validates Gherkin feature files.
//!
//! Exit status is `0` when validation passes (or violations are configured
//! not to fail the build), `1` when violations fail the build, and `2` when
//! the configuration is invalid or the report cannot be written.

use std::process::ExitCode;

mod cli;
mod output;

use cli::Outcome;

fn main() -> ExitCode {
    match cli::run() {
        Ok(Outcome::Passed) => ExitCode::SUCCESS,
        Ok(Outcome::Failed) => ExitCode::from(1),
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "feature validation aborted");
            ExitCode::from(2)
        }
    }
}
