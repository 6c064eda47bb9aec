//! Token repository trait defining the interface for issued-token persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::token::TokenRecord;
use crate::errors::DomainError;

/// Repository trait for issued-token records
///
/// Records are keyed by their signed value. Implementations must apply every
/// mutation atomically per record: no read-modify-write across calls.
///
/// # Example
/// ```no_run
/// # use st_core::repositories::TokenRepository;
/// # use st_core::domain::entities::token::{TokenKind, TokenRecord};
/// # async fn example(repo: &impl TokenRepository) -> Result<(), Box<dyn std::error::Error>> {
/// let record = TokenRecord::new(42, "eyJhbGciOi...", TokenKind::Access, chrono::Duration::minutes(15))?;
/// repo.insert(record).await?;
///
/// if let Some(found) = repo.find_by_value("eyJhbGciOi...").await? {
///     println!("token belongs to user {}", found.user_id);
/// }
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Store a new record
    ///
    /// # Returns
    /// * `Ok(TokenRecord)` - The stored record
    /// * `Err(DomainError)` - Duplicate value or backend failure
    async fn insert(&self, record: TokenRecord) -> Result<TokenRecord, DomainError>;

    /// Find a record by its signed value
    async fn find_by_value(&self, value: &str) -> Result<Option<TokenRecord>, DomainError>;

    /// Mark a record revoked
    ///
    /// # Returns
    /// * `Ok(true)` - A record with this value exists (already revoked counts)
    /// * `Ok(false)` - No such record
    async fn revoke(&self, value: &str) -> Result<bool, DomainError>;

    /// Revoke every record of `user_id` that is usable at `now`
    ///
    /// # Returns
    /// Number of records revoked by this call
    async fn revoke_all_usable(&self, user_id: i64, now: DateTime<Utc>) -> Result<usize, DomainError>;

    /// All records of `user_id` that are usable at `now`
    async fn find_usable_by_user(
        &self,
        user_id: i64,
        now: DateTime<Utc>,
    ) -> Result<Vec<TokenRecord>, DomainError>;

    /// Delete every record with `expires_at < now`, revoked or not
    ///
    /// # Returns
    /// Number of records deleted
    async fn delete_expired_before(&self, now: DateTime<Utc>) -> Result<usize, DomainError>;

    /// Whether `value` exists, is not revoked and has not expired at `now`
    async fn is_usable(&self, value: &str, now: DateTime<Utc>) -> Result<bool, DomainError> {
        Ok(self
            .find_by_value(value)
            .await?
            .map(|record| record.is_usable_at(now))
            .unwrap_or(false))
    }
}
