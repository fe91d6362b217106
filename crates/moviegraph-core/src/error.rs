//! Centralized error types for MovieGraph.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for MovieGraph core operations.
#[derive(Error, Debug)]
pub enum MovieGraphError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Config file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("Failed to parse config file {}: {source}", .path.display())]
    TomlParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for MovieGraph core operations.
pub type MovieGraphResult<T> = Result<T, MovieGraphError>;

impl MovieGraphError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
