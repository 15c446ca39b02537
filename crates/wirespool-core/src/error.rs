//! Error types for wirespool.

use thiserror::Error;

/// Result type alias using wirespool's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for catalog and calculation operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Wire type not found in the caller's scope
    #[error("Wire type not found: {0}")]
    WireTypeNotFound(i64),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Attempted mutation of a default (built-in) record
    #[error("Protected: {0}")]
    Protected(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::InvalidInput(e.to_string())
    }
}

impl Error {
    /// Whether this error is caused by the caller rather than the server.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::NotFound(_)
                | Error::WireTypeNotFound(_)
                | Error::InvalidInput(_)
                | Error::Protected(_)
        )
    }
}
