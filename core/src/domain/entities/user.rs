//! User entity as exposed by the external user directory.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Role granted to every new account
pub const DEFAULT_ROLE: &str = "USER";

/// User entity representing a registered account
///
/// Read-only from the token core's point of view, except for password
/// updates during a reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: i64,

    /// Login email, unique across accounts
    pub email: String,

    /// Password hash owned by the directory
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Role names
    pub roles: BTreeSet<String>,

    /// Inactive accounts cannot log in
    pub active: bool,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new active user
    pub fn new(
        id: i64,
        email: impl Into<String>,
        password_hash: impl Into<String>,
        roles: impl IntoIterator<Item = String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            email: email.into(),
            password_hash: password_hash.into(),
            roles: roles.into_iter().collect(),
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Role names in stable order, as embedded in token claims
    pub fn role_list(&self) -> Vec<String> {
        self.roles.iter().cloned().collect()
    }

    /// Deactivates the account
    pub fn deactivate(&mut self) {
        self.active = false;
        self.updated_at = Utc::now();
    }
}
