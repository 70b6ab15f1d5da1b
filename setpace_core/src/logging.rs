//! Logging infrastructure for Setpace.
//!
//! Centralized tracing setup shared by every binary.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize logging with sensible defaults.
///
/// Default level is WARN so countdown rendering stays clean; override
/// with the RUST_LOG environment variable when debugging transitions.
pub fn init() {
    init_with_level("warn")
}

/// Initialize logging with a specific default level.
///
/// The RUST_LOG environment variable still takes precedence.
pub fn init_with_level(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}
