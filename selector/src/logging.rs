//! Development-time tracing for debugging the selector.
//!
//! The state machine logs its fallbacks (unknown types, missing object
//! parameters, cleared types) at `debug`/`warn`. None of this is product
//! output: the binary prints its results on stdout, diagnostics go to stderr.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing subscriber for development logging.
///
/// Reads `RUST_LOG` env var. Defaults to `warn` if unset.
/// Output: stderr, compact format.
///
/// # Example
/// ```bash
/// RUST_LOG=selector=debug cargo run -- replay session.toml
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
