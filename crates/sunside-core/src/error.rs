//! Error types for route sampling and sun-side analysis.

use thiserror::Error;

/// Result alias used throughout the core.
pub type Result<T> = std::result::Result<T, SunsideError>;

#[derive(Debug, Error)]
pub enum SunsideError {
    /// Caller supplied a value outside its valid domain.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The solar ephemeris failed; the underlying error is kept as the source.
    #[error("ephemeris failure: {0}")]
    Ephemeris(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),

    #[error("failed to serialize report: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SunsideError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn ephemeris<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Ephemeris(Box::new(err))
    }
}
