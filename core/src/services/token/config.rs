//! Lifetimes applied to freshly issued tokens

use chrono::{Duration, Utc};
use st_shared::config::JwtConfig;

use crate::domain::entities::token::{
    expiry_after, TokenKind, DEFAULT_ACCESS_TOKEN_TTL_SECONDS, DEFAULT_REFRESH_TOKEN_TTL_SECONDS,
};
use crate::errors::DomainError;

/// Configuration for the token store
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// Lifetime of access tokens
    pub access_token_ttl: Duration,
    /// Lifetime of refresh tokens (and password-reset tokens)
    pub refresh_token_ttl: Duration,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            access_token_ttl: Duration::seconds(DEFAULT_ACCESS_TOKEN_TTL_SECONDS),
            refresh_token_ttl: Duration::seconds(DEFAULT_REFRESH_TOKEN_TTL_SECONDS),
        }
    }
}

impl TokenServiceConfig {
    /// Take the lifetimes from the JWT settings
    ///
    /// Fails with `DomainError::Config` unless both lifetimes are positive and
    /// a token issued now could carry them.
    pub fn from_jwt_config(jwt: &JwtConfig) -> Result<Self, DomainError> {
        Ok(Self {
            access_token_ttl: ttl_from_seconds("access", jwt.access_token_expiry)?,
            refresh_token_ttl: ttl_from_seconds("refresh", jwt.refresh_token_expiry)?,
        })
    }

    /// Lifetime for a token of `kind`
    pub fn ttl_for(&self, kind: TokenKind) -> Duration {
        match kind {
            TokenKind::Access => self.access_token_ttl,
            TokenKind::Refresh => self.refresh_token_ttl,
        }
    }
}

fn ttl_from_seconds(name: &str, seconds: i64) -> Result<Duration, DomainError> {
    if seconds <= 0 {
        return Err(DomainError::Config {
            message: format!("JWT {} token expiry must be positive, got {}", name, seconds),
        });
    }

    let ttl = Duration::try_seconds(seconds).ok_or_else(|| DomainError::Config {
        message: format!("JWT {} token expiry of {}s is out of range", name, seconds),
    })?;
    expiry_after(Utc::now(), ttl)?;

    Ok(ttl)
}
