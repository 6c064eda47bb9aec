//! Domain-specific error types and error handling.

mod types;

pub use types::{AuthError, DecodeError, TokenError};

use thiserror::Error;

/// Core domain errors
///
/// Mutating flows return exactly one of these per failure. Callers branch
/// on the variant, never on the message text.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    /// Missing or unusable signing configuration. Fatal at startup.
    #[error("Configuration error: {message}")]
    Config { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl DomainError {
    /// Shorthand for an internal error with a formatted message
    pub fn internal(message: impl Into<String>) -> Self {
        DomainError::Internal {
            message: message.into(),
        }
    }

    /// Whether the error is a credential or token rejection rather than a fault
    pub fn is_rejection(&self) -> bool {
        match self {
            DomainError::Auth(_) => true,
            DomainError::Token(e) => !matches!(e, TokenError::StoreUnavailable),
            DomainError::Validation { .. } => true,
            _ => false,
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
