//! Semantic error types for feature file validation.
//!
//! Validation findings are never errors: they accumulate in a
//! [`ValidationReport`](crate::report::ValidationReport). The types here cover
//! the conditions that stop a run before it starts (bad configuration) and the
//! per-file read failures that the engine converts into report entries.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while preparing a validation run.
#[derive(Debug, Error)]
pub enum AuditError {
    /// An invalid configuration value was provided.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// A candidate feature file could not be opened or decoded.
///
/// The engine isolates this failure to the affected file; the rest of the
/// corpus is still analysed.
#[derive(Debug, Error)]
#[error("failed to read feature file {}: {source}", path.display())]
pub struct FeatureReadError {
    /// Path of the unreadable file.
    pub path: PathBuf,
    /// Underlying I/O failure.
    #[source]
    pub source: std::io::Error,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_config_error_displays_message() {
        let error = AuditError::InvalidConfig("unknown log level".to_string());
        assert_eq!(
            error.to_string(),
            "invalid configuration: unknown log level"
        );
    }

    #[test]
    fn read_error_names_path_and_cause() {
        let error = FeatureReadError {
            path: PathBuf::from("features/login.feature"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let message = error.to_string();
        assert!(message.contains("features/login.feature"));
        assert!(message.contains("denied"));
    }
}
