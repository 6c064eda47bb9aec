//! Shared configuration and wire types for the SmartTransit auth token core
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - Error codes and the standard error/response envelopes

pub mod config;
pub mod errors;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, CacheConfig, CleanupConfig, DatabaseConfig, Environment, JwtConfig,
    LoggingConfig, ServerConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use types::ApiResponse;
