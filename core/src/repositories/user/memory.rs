//! In-process user directory backed by bcrypt hashes

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

use super::r#trait::UserDirectory;

/// User directory holding accounts in memory
///
/// Used by the binary when no database is configured and by tests.
#[derive(Clone)]
pub struct InMemoryUserDirectory {
    users: Arc<RwLock<HashMap<i64, User>>>,
    bcrypt_cost: u32,
}

impl Default for InMemoryUserDirectory {
    fn default() -> Self {
        Self::with_cost(bcrypt::DEFAULT_COST)
    }
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory hashing with a specific bcrypt cost (tests use the minimum)
    pub fn with_cost(bcrypt_cost: u32) -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            bcrypt_cost,
        }
    }

    /// Register an account with a plaintext password
    pub async fn add_user(
        &self,
        id: i64,
        email: &str,
        password: &str,
        roles: Vec<String>,
    ) -> Result<User, DomainError> {
        let hash = self.hash(password)?;
        let user = User::new(id, email, hash, roles);
        self.insert(user.clone()).await?;
        Ok(user)
    }

    /// Store a prepared user
    pub async fn insert(&self, user: User) -> Result<(), DomainError> {
        let mut users = self.users.write().await;

        if users.contains_key(&user.id) || users.values().any(|u| u.email == user.email) {
            return Err(DomainError::Validation {
                message: "User already exists".to_string(),
            });
        }

        users.insert(user.id, user);
        Ok(())
    }

    /// Deactivate an account so it can no longer log in
    pub async fn deactivate(&self, user_id: i64) -> Result<bool, DomainError> {
        let mut users = self.users.write().await;
        Ok(match users.get_mut(&user_id) {
            Some(user) => {
                user.deactivate();
                true
            }
            None => false,
        })
    }

    fn hash(&self, password: &str) -> Result<String, DomainError> {
        bcrypt::hash(password, self.bcrypt_cost)
            .map_err(|e| DomainError::internal(format!("Failed to hash password: {}", e)))
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, user_id: i64) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(&user_id).cloned())
    }

    async fn verify_password(&self, user: &User, password: &str) -> Result<bool, DomainError> {
        // A corrupt hash is a mismatch, not a fault
        Ok(bcrypt::verify(password, &user.password_hash).unwrap_or(false))
    }

    async fn update_password_hash(&self, user_id: i64, new_password: &str) -> Result<(), DomainError> {
        let hash = self.hash(new_password)?;
        let mut users = self.users.write().await;

        let user = users.get_mut(&user_id).ok_or_else(|| DomainError::NotFound {
            resource: format!("user {}", user_id),
        })?;
        user.password_hash = hash;
        user.updated_at = Utc::now();
        Ok(())
    }
}
