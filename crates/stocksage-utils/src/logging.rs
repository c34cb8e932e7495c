//! Logging and tracing utilities

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing with `RUST_LOG`, falling back to `info`
pub fn init_tracing() {
    init_tracing_with_default("info");
}

/// Initialize tracing with `RUST_LOG`, falling back to `default_filter`
///
/// Output goes to stderr so it never interleaves with answers on stdout.
/// Calling this twice is harmless; the second subscriber is ignored.
pub fn init_tracing_with_default(default_filter: &str) {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
