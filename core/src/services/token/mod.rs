//! Token lifecycle module
//!
//! This module handles all token-related operations including:
//! - Signed token encoding and stateless verification (`TokenCodec`)
//! - Issued-token persistence and revocation (`TokenStore`)
//! - Combined validity checks (`TokenValidator`)
//! - Background cleanup of expired tokens

mod cleanup;
mod codec;
mod config;
mod store;
mod validator;

#[cfg(test)]
mod tests;

pub use cleanup::{CleanupResult, TokenCleanupService};
pub use codec::TokenCodec;
pub use config::TokenServiceConfig;
pub use store::TokenStore;
pub use validator::{TokenValidator, VerifiedToken};
