//! Diagnostic tracing for the bootstrap.
//!
//! Tracing output goes to stderr and is controlled by `RUST_LOG`. Tool output
//! and the run summary go to stdout and are unaffected by it.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber.
///
/// Reads `RUST_LOG`. Defaults to `warn` if unset, which still surfaces
/// failed commands and a missing package manager.
///
/// # Example
/// ```bash
/// RUST_LOG=bootstrap=info bootstrap
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
