//! In-process implementation of TokenRepository
//!
//! Backs the service when no database is configured, and every unit test.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::token::TokenRecord;
use crate::errors::DomainError;

use super::r#trait::TokenRepository;

/// Token repository holding records in a map keyed by value
#[derive(Clone, Default)]
pub struct InMemoryTokenRepository {
    tokens: Arc<RwLock<HashMap<String, TokenRecord>>>,
}

impl InMemoryTokenRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records, expired and revoked included
    pub async fn len(&self) -> usize {
        self.tokens.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.tokens.read().await.is_empty()
    }
}

#[async_trait]
impl TokenRepository for InMemoryTokenRepository {
    async fn insert(&self, record: TokenRecord) -> Result<TokenRecord, DomainError> {
        let mut tokens = self.tokens.write().await;

        if tokens.contains_key(&record.value) {
            return Err(DomainError::Validation {
                message: "Token already exists".to_string(),
            });
        }

        tokens.insert(record.value.clone(), record.clone());
        Ok(record)
    }

    async fn find_by_value(&self, value: &str) -> Result<Option<TokenRecord>, DomainError> {
        let tokens = self.tokens.read().await;
        Ok(tokens.get(value).cloned())
    }

    async fn revoke(&self, value: &str) -> Result<bool, DomainError> {
        let mut tokens = self.tokens.write().await;

        match tokens.get_mut(value) {
            Some(record) => {
                record.revoke();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn revoke_all_usable(&self, user_id: i64, now: DateTime<Utc>) -> Result<usize, DomainError> {
        let mut tokens = self.tokens.write().await;
        let mut count = 0;

        for record in tokens.values_mut() {
            if record.user_id == user_id && record.is_usable_at(now) {
                record.revoke();
                count += 1;
            }
        }

        Ok(count)
    }

    async fn find_usable_by_user(
        &self,
        user_id: i64,
        now: DateTime<Utc>,
    ) -> Result<Vec<TokenRecord>, DomainError> {
        let tokens = self.tokens.read().await;
        let mut records: Vec<TokenRecord> = tokens
            .values()
            .filter(|r| r.user_id == user_id && r.is_usable_at(now))
            .cloned()
            .collect();
        records.sort_by_key(|r| r.created_at);
        Ok(records)
    }

    async fn delete_expired_before(&self, now: DateTime<Utc>) -> Result<usize, DomainError> {
        let mut tokens = self.tokens.write().await;
        let initial_count = tokens.len();

        tokens.retain(|_, record| record.expires_at >= now);

        Ok(initial_count - tokens.len())
    }
}
