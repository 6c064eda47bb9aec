//! Session flow results returned to the presentation layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::token::Claims;

/// Tokens and identity returned by login and refresh
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TokenBundle {
    /// JWT access token for API authentication
    pub access_token: String,

    /// JWT refresh token for obtaining new access tokens
    pub refresh_token: String,

    /// Numeric user id
    pub user_id: i64,

    /// Account email
    pub email: String,

    /// Role names
    pub roles: Vec<String>,
}

/// Verdict of the shared validate call
///
/// An invalid verdict carries no identity fields at all.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TokenDetails {
    pub valid: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,
}

impl TokenDetails {
    /// The single shape of every failed validation
    pub fn invalid() -> Self {
        Self {
            valid: false,
            user_id: None,
            email: None,
            roles: None,
        }
    }

    /// Details of a token that passed every check
    pub fn from_claims(claims: &Claims) -> Self {
        Self {
            valid: true,
            user_id: Some(claims.user_id),
            email: Some(claims.sub.clone()),
            roles: Some(claims.roles.clone()),
        }
    }
}

/// Status of a password-reset token, for the verify endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResetTokenStatus {
    pub valid: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl ResetTokenStatus {
    pub fn invalid() -> Self {
        Self {
            valid: false,
            expires_at: None,
        }
    }
}
