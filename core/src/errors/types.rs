//! Error kinds for credential checks and token handling

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown account, inactive account and wrong password all collapse here
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,
}

/// Token-related errors
///
/// The fine-grained variants are what the validator reports and what gets
/// logged. `InvalidOrExpired` is the coarse kind surfaced to callers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    Expired,

    #[error("Token revoked")]
    Revoked,

    #[error("Malformed token")]
    Malformed,

    #[error("Token not found")]
    NotFound,

    #[error("Token type mismatch")]
    TypeMismatch,

    #[error("Invalid or expired token")]
    InvalidOrExpired,

    #[error("Token store unavailable")]
    StoreUnavailable,
}

impl TokenError {
    /// Collapse the fine-grained rejection kinds into the caller-facing one
    pub fn coarse(self) -> Self {
        match self {
            TokenError::Expired
            | TokenError::Revoked
            | TokenError::Malformed
            | TokenError::NotFound => TokenError::InvalidOrExpired,
            other => other,
        }
    }
}

/// Outcome of a failed stateless decode
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// Signature and structure are fine but `exp` has passed
    #[error("token expired")]
    Expired,

    /// Bad signature, bad encoding, wrong issuer or unusable claims
    #[error("token malformed")]
    Malformed,
}

impl From<DecodeError> for TokenError {
    fn from(err: DecodeError) -> Self {
        match err {
            DecodeError::Expired => TokenError::Expired,
            DecodeError::Malformed => TokenError::Malformed,
        }
    }
}
