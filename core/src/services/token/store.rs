//! Issued-token bookkeeping on top of a TokenRepository backend

use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::domain::entities::token::{TokenKind, TokenRecord};
use crate::errors::DomainError;
use crate::repositories::TokenRepository;

use super::config::TokenServiceConfig;

/// Persists issued tokens along with their revocation and expiry state
pub struct TokenStore<R: TokenRepository> {
    repository: Arc<R>,
    config: TokenServiceConfig,
}

impl<R: TokenRepository> TokenStore<R> {
    pub fn new(repository: Arc<R>, config: TokenServiceConfig) -> Self {
        Self { repository, config }
    }

    /// Lifetime applied to tokens of `kind`
    pub fn ttl_for(&self, kind: TokenKind) -> Duration {
        self.config.ttl_for(kind)
    }

    /// Record a freshly minted token as usable
    pub async fn put(&self, user_id: i64, value: &str, kind: TokenKind) -> Result<TokenRecord, DomainError> {
        let record = TokenRecord::new(user_id, value, kind, self.ttl_for(kind))?;

        self.repository.insert(record).await.map_err(|e| {
            error!(user_id, kind = %kind, error = %e, "Failed to store token");
            e
        })
    }

    /// Revoke a token by value. Unknown values are ignored.
    pub async fn revoke(&self, value: &str) -> Result<(), DomainError> {
        if !self.repository.revoke(value).await? {
            debug!("Revoke requested for unknown token");
        }
        Ok(())
    }

    /// Revoke every usable token of a user, returning how many were revoked
    pub async fn revoke_all(&self, user_id: i64) -> Result<usize, DomainError> {
        let count = self.repository.revoke_all_usable(user_id, Utc::now()).await?;
        info!(user_id, count, "Revoked user tokens");
        Ok(count)
    }

    pub async fn is_usable(&self, value: &str) -> Result<bool, DomainError> {
        self.repository.is_usable(value, Utc::now()).await
    }

    pub async fn find(&self, value: &str) -> Result<Option<TokenRecord>, DomainError> {
        self.repository.find_by_value(value).await
    }

    /// Usable tokens of a user, oldest first
    pub async fn find_usable(&self, user_id: i64) -> Result<Vec<TokenRecord>, DomainError> {
        self.repository.find_usable_by_user(user_id, Utc::now()).await
    }

    pub async fn has_usable(&self, user_id: i64) -> Result<bool, DomainError> {
        Ok(!self.find_usable(user_id).await?.is_empty())
    }

    /// Delete records that expired before `now`, whether revoked or not
    pub async fn sweep_expired(&self, now: DateTime<Utc>) -> Result<usize, DomainError> {
        self.repository.delete_expired_before(now).await
    }
}
