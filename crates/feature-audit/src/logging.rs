//! Diagnostic output for validation runs.
//!
//! The engine emits `tracing` events for parsed files, skipped or unreadable
//! paths and the run summary. Events go to stderr; a CLI front end writes the
//! report itself to stdout.

use tracing_subscriber::EnvFilter;

use crate::config::AuditConfig;

fn filter_from_config(config: &AuditConfig) -> EnvFilter {
    EnvFilter::new(config.log_level.as_filter_str())
}

/// Install a stderr subscriber filtered at `config.log_level`.
///
/// The level is whatever the caller resolved into the config, normally
/// `--log-level` over `FEATURE_AUDIT_LOG_LEVEL` over `warn`. Only the first
/// call in a process installs a subscriber; later calls are no-ops.
pub fn init_logging(config: &AuditConfig) {
    let filter = filter_from_config(config);

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
