//! MySQL-backed user directory
//!
//! Reads accounts from the `users` table and hashes passwords with bcrypt.
//! Roles are stored as a comma-separated list.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};

use st_core::domain::entities::user::User;
use st_core::errors::DomainError;
use st_core::repositories::UserDirectory;

const SELECT_COLUMNS: &str =
    "SELECT id, email, password_hash, roles, active, created_at, updated_at FROM users";

/// MySQL implementation of UserDirectory
pub struct MySqlUserDirectory {
    pool: MySqlPool,
}

impl MySqlUserDirectory {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let roles: String = row.try_get("roles").map_err(column_error("roles"))?;

        Ok(User {
            id: row.try_get("id").map_err(column_error("id"))?,
            email: row.try_get("email").map_err(column_error("email"))?,
            password_hash: row
                .try_get("password_hash")
                .map_err(column_error("password_hash"))?,
            roles: parse_roles(&roles).collect(),
            active: row.try_get("active").map_err(column_error("active"))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(column_error("created_at"))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(column_error("updated_at"))?,
        })
    }

    fn find_error(e: sqlx::Error) -> DomainError {
        tracing::error!("Failed to find user: {}", e);
        DomainError::internal(format!("Failed to find user: {}", e))
    }
}

fn parse_roles(raw: &str) -> impl Iterator<Item = String> + '_ {
    raw.split(',')
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(String::from)
}

fn column_error(column: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| DomainError::internal(format!("Failed to get {}: {}", column, e))
}

#[async_trait]
impl UserDirectory for MySqlUserDirectory {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let query = format!("{} WHERE email = ? LIMIT 1", SELECT_COLUMNS);
        let row = sqlx::query(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(Self::find_error)?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_by_id(&self, user_id: i64) -> Result<Option<User>, DomainError> {
        let query = format!("{} WHERE id = ? LIMIT 1", SELECT_COLUMNS);
        let row = sqlx::query(&query)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Self::find_error)?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn verify_password(&self, user: &User, password: &str) -> Result<bool, DomainError> {
        let password = password.to_string();
        let hash = user.password_hash.clone();

        tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash).unwrap_or(false))
            .await
            .map_err(|e| DomainError::internal(format!("Password check aborted: {}", e)))
    }

    async fn update_password_hash(&self, user_id: i64, new_password: &str) -> Result<(), DomainError> {
        let password = new_password.to_string();
        let hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, bcrypt::DEFAULT_COST))
            .await
            .map_err(|e| DomainError::internal(format!("Password hashing aborted: {}", e)))?
            .map_err(|e| DomainError::internal(format!("Failed to hash password: {}", e)))?;

        let result = sqlx::query("UPDATE users SET password_hash = ?, updated_at = ? WHERE id = ?")
            .bind(hash)
            .bind(Utc::now())
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update password: {}", e);
                DomainError::internal(format!("Failed to update password: {}", e))
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: format!("user {}", user_id),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roles() {
        let roles: Vec<String> = parse_roles("USER, ADMIN,,").collect();
        assert_eq!(roles, vec!["USER".to_string(), "ADMIN".to_string()]);
        assert_eq!(parse_roles("").count(), 0);
    }
}
