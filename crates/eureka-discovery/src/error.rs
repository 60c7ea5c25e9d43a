//! Error types for the registry client and configuration

use thiserror::Error;

/// Eureka adapter error type
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Registry answered with a non-success status
    #[error("Registry returned HTTP {status} for {url}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Requested URL
        url: String,
    },

    /// Registry could not be reached
    #[error("Registry unavailable: {0}")]
    Unavailable(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization error
    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<Error> for discovery_model::Error {
    fn from(err: Error) -> Self {
        discovery_model::Error::registry(err)
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
