//! User directory trait: the external account store consulted by session flows.

use async_trait::async_trait;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Read access to accounts plus the one write the token core needs
///
/// The directory owns credential storage. It hashes and verifies passwords;
/// callers only ever hand it plaintext.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Find a user by login email
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No account with that email
    /// * `Err(DomainError)` - Backend failure
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by numeric id
    async fn find_by_id(&self, user_id: i64) -> Result<Option<User>, DomainError>;

    /// Check a plaintext password against the user's stored hash
    async fn verify_password(&self, user: &User, password: &str) -> Result<bool, DomainError>;

    /// Hash `new_password` and store it for `user_id`
    async fn update_password_hash(&self, user_id: i64, new_password: &str) -> Result<(), DomainError>;
}
