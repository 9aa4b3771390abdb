//! # Document Store Errors

use thiserror::Error;

/// Result type for document store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Document store errors
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("Cheat sheet not found: {0}")]
    NotFound(String),

    #[error("Invalid cheat sheet name: {0:?}")]
    InvalidName(String),

    #[error("Malformed cheat sheet {name}: {message}")]
    Malformed { name: String, message: String },

    #[error("I/O error: {0}")]
    IoError(String),
}

impl StoreError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            StoreError::NotFound(_) => 404,
            StoreError::InvalidName(_) => 400,
            StoreError::Malformed { .. } => 500,
            StoreError::IoError(_) => 500,
        }
    }

    pub(crate) fn malformed(name: &str, message: impl Into<String>) -> Self {
        StoreError::Malformed {
            name: name.to_string(),
            message: message.into(),
        }
    }
}
