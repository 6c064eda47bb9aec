//! # Infrastructure Layer
//!
//! Concrete backends for the SmartTransit auth token core:
//! - **Database**: MySQL token repository and user directory using SQLx
//! - **Events**: Redis pub/sub sink for login and password-reset events

pub mod database;
pub mod events;

pub use database::{DatabasePool, MySqlTokenRepository, MySqlUserDirectory};
pub use events::RedisEventSink;

use st_core::errors::DomainError;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Event payload could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        DomainError::Internal {
            message: err.to_string(),
        }
    }
}
