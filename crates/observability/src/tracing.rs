//! Tracing/logging initialization.

use tracing_subscriber::EnvFilter;

/// Install the process-wide subscriber.
///
/// Filtering comes from `RUST_LOG`, defaulting to `info`. Repeat calls
/// are no-ops, so tests can call this unconditionally.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .try_init();
}
