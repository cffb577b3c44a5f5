//! Tracing setup — line-oriented diagnostic output for the simulation.

use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber with human-readable line output.
///
/// Respects the `CONFLUX_LOG` environment variable for filtering.
/// Defaults to `info` level if not set.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env("CONFLUX_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

/// Initialize tracing with a custom filter string (for testing or embedding).
///
/// Returns quietly if a global subscriber is already installed, so test
/// binaries can call it from every case.
pub fn init_tracing_with_filter(filter: &str) {
    let filter = EnvFilter::new(filter);

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
