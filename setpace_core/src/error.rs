//! Error types for the setpace_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for setpace_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Application configuration file error
    #[error("Config error: {0}")]
    Config(String),

    /// Timer configuration rejected (invalid durations or round count)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Workout plan rejected
    #[error("Plan error: {0}")]
    Plan(String),
}
