//! MySQL implementation of the TokenRepository trait.
//!
//! Each mutation is a single `UPDATE` or `DELETE` statement, so concurrent
//! callers rely on row-level atomicity and never read-modify-write.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use st_core::domain::entities::token::{TokenKind, TokenRecord};
use st_core::errors::DomainError;
use st_core::repositories::TokenRepository;

const SELECT_COLUMNS: &str =
    "SELECT id, user_id, token_value, token_type, created_at, expires_at, revoked FROM auth_tokens";

/// MySQL implementation of TokenRepository
///
/// Rows are looked up by the SHA-256 of the token value, which carries the
/// unique index.
pub struct MySqlTokenRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlTokenRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Hash a token value using SHA-256
    pub fn hash_token(token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    fn row_to_record(row: &sqlx::mysql::MySqlRow) -> Result<TokenRecord, DomainError> {
        let id: String = row.try_get("id").map_err(column_error("id"))?;
        let kind: String = row.try_get("token_type").map_err(column_error("token_type"))?;

        Ok(TokenRecord {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::internal(format!("Invalid token UUID: {}", e)))?,
            user_id: row.try_get("user_id").map_err(column_error("user_id"))?,
            value: row.try_get("token_value").map_err(column_error("token_value"))?,
            kind: kind.parse::<TokenKind>().map_err(DomainError::internal)?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(column_error("created_at"))?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(column_error("expires_at"))?,
            revoked: row.try_get("revoked").map_err(column_error("revoked"))?,
        })
    }
}

fn column_error(column: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| DomainError::internal(format!("Failed to get {}: {}", column, e))
}

fn query_error(action: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| {
        tracing::error!("Failed to {}: {}", action, e);
        DomainError::internal(format!("Failed to {}: {}", action, e))
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

#[async_trait]
impl TokenRepository for MySqlTokenRepository {
    async fn insert(&self, record: TokenRecord) -> Result<TokenRecord, DomainError> {
        let query = r#"
            INSERT INTO auth_tokens (
                id, user_id, token_hash, token_value, token_type, created_at, expires_at, revoked
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        let result = sqlx::query(query)
            .bind(record.id.to_string())
            .bind(record.user_id)
            .bind(Self::hash_token(&record.value))
            .bind(&record.value)
            .bind(record.kind.as_str())
            .bind(record.created_at)
            .bind(record.expires_at)
            .bind(record.revoked)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(record),
            Err(e) if is_unique_violation(&e) => Err(DomainError::Validation {
                message: "Token already exists".to_string(),
            }),
            Err(e) => Err(query_error("insert token")(e)),
        }
    }

    async fn find_by_value(&self, value: &str) -> Result<Option<TokenRecord>, DomainError> {
        let query = format!("{} WHERE token_hash = ? LIMIT 1", SELECT_COLUMNS);

        let row = sqlx::query(&query)
            .bind(Self::hash_token(value))
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error("find token"))?;

        row.as_ref().map(Self::row_to_record).transpose()
    }

    async fn revoke(&self, value: &str) -> Result<bool, DomainError> {
        let token_hash = Self::hash_token(value);

        let result = sqlx::query("UPDATE auth_tokens SET revoked = TRUE WHERE token_hash = ? AND revoked = FALSE")
            .bind(&token_hash)
            .execute(&self.pool)
            .await
            .map_err(query_error("revoke token"))?;

        if result.rows_affected() > 0 {
            return Ok(true);
        }

        // Nothing changed: either unknown or already revoked
        let exists: i64 = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM auth_tokens WHERE token_hash = ?)")
            .bind(&token_hash)
            .fetch_one(&self.pool)
            .await
            .map_err(query_error("check token existence"))?;

        Ok(exists != 0)
    }

    async fn revoke_all_usable(&self, user_id: i64, now: DateTime<Utc>) -> Result<usize, DomainError> {
        let query = r#"
            UPDATE auth_tokens
            SET revoked = TRUE
            WHERE user_id = ? AND revoked = FALSE AND expires_at > ?
        "#;

        let result = sqlx::query(query)
            .bind(user_id)
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(query_error("revoke user tokens"))?;

        Ok(result.rows_affected() as usize)
    }

    async fn find_usable_by_user(
        &self,
        user_id: i64,
        now: DateTime<Utc>,
    ) -> Result<Vec<TokenRecord>, DomainError> {
        let query = format!(
            "{} WHERE user_id = ? AND revoked = FALSE AND expires_at > ? ORDER BY created_at ASC",
            SELECT_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(user_id)
            .bind(now)
            .fetch_all(&self.pool)
            .await
            .map_err(query_error("find user tokens"))?;

        rows.iter().map(Self::row_to_record).collect()
    }

    async fn delete_expired_before(&self, now: DateTime<Utc>) -> Result<usize, DomainError> {
        let result = sqlx::query("DELETE FROM auth_tokens WHERE expires_at < ?")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(query_error("delete expired tokens"))?;

        Ok(result.rows_affected() as usize)
    }
}
