//! Pre-build validation for corpora of Gherkin feature files.
//!
//! The crate answers three questions over a directory tree:
//!
//! - does any file exceed the configured scenario ceiling,
//! - do two or more files declare the same feature description,
//! - do two or more scenarios share a name.
//!
//! It also flags data-table cells that are empty after trimming. Only the
//! keyword subset needed for counting and duplicate detection is recognised;
//! this is not a Gherkin grammar.
//!
//! # Configuration
//!
//! Settings come from [`config::AuditConfig`], loaded from
//! `FEATURE_AUDIT_*` environment variables and optionally overridden by a
//! command-line front end.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use feature_audit::config::AuditConfig;
//! use feature_audit::engine::ValidationEngine;
//!
//! let config = AuditConfig::from_env()?;
//! let fail = config.fail_on_violations;
//! let report = ValidationEngine::new(config).validate(Path::new("tests/features"));
//! if report.fails_build(fail) {
//!     for violation in &report.violations {
//!         eprintln!("{violation}");
//!     }
//! }
//! # Ok::<(), feature_audit::error::AuditError>(())
//! ```

pub mod classifier;
pub mod config;
pub mod discovery;
pub mod engine;
pub mod error;
pub mod logging;
pub mod parser;
pub mod report;
pub mod tracker;

/// Test support utilities for unit and integration tests.
///
/// This module is hidden from documentation as it's intended for internal
/// test use only.
#[cfg(feature = "test-support")]
#[doc(hidden)]
pub mod test_support;
