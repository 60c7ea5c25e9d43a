//! Error types for service discovery queries

use thiserror::Error;

/// Boxed error carried from an upstream registry
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Service discovery error type
#[derive(Error, Debug)]
pub enum Error {
    /// The upstream registry could not produce a snapshot
    #[error(transparent)]
    Registry(BoxError),

    /// The operation is not supported by this registry
    #[error("not implemented: {0}")]
    NotImplemented(&'static str),
}

impl Error {
    /// Wrap an upstream registry failure
    pub fn registry(err: impl Into<BoxError>) -> Self {
        Self::Registry(err.into())
    }

    /// Whether this is the permanent unsupported-operation failure
    pub fn is_not_implemented(&self) -> bool {
        matches!(self, Self::NotImplemented(_))
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
