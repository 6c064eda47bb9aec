//! # SmartTransit Auth Core
//!
//! Domain layer for the bearer-token lifecycle shared by every SmartTransit
//! service. This crate contains the domain entities, error types, repository
//! and collaborator traits, and the services that issue, validate, refresh
//! and revoke tokens.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{
    Claims, ResetTokenStatus, SessionEvent, TokenBundle, TokenDetails, TokenKind, TokenRecord,
    User,
};
pub use errors::{AuthError, DecodeError, DomainError, DomainResult, TokenError};
pub use repositories::{InMemoryTokenRepository, InMemoryUserDirectory, TokenRepository, UserDirectory};
pub use services::{
    CleanupResult, EventSink, InMemoryEventSink, SessionService, SessionServiceConfig,
    TokenCleanupService, TokenCodec, TokenServiceConfig, TokenStore, TokenValidator,
    TracingEventSink, VerifiedToken,
};
