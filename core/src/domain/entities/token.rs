//! Token entities for JWT-based authentication.

use chrono::{DateTime, Duration, Utc};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::DomainError;

/// Access token lifetime used when no configuration is supplied (15 minutes)
pub const DEFAULT_ACCESS_TOKEN_TTL_SECONDS: i64 = 900;

/// Refresh token lifetime used when no configuration is supplied (7 days)
pub const DEFAULT_REFRESH_TOKEN_TTL_SECONDS: i64 = 604_800;

/// Purpose a token was minted for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TokenKind {
    /// Short-lived credential authorizing API calls
    Access,
    /// Longer-lived credential used to mint new access tokens
    Refresh,
}

impl TokenKind {
    /// Stable storage representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Access => "ACCESS",
            TokenKind::Refresh => "REFRESH",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TokenKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACCESS" => Ok(TokenKind::Access),
            "REFRESH" => Ok(TokenKind::Refresh),
            other => Err(format!("Unknown token kind: {}", other)),
        }
    }
}

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user email)
    pub sub: String,

    /// Numeric user identifier, always written as a JSON integer
    #[serde(rename = "userId", deserialize_with = "deserialize_user_id")]
    pub user_id: i64,

    /// Role names granted to the user
    #[serde(default)]
    pub roles: Vec<String>,

    /// Token purpose
    #[serde(rename = "tokenType")]
    pub kind: TokenKind,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Issuer
    pub iss: String,

    /// JWT ID, makes every minted token distinct
    pub jti: String,
}

impl Claims {
    /// Creates claims for a token issued now and living for `ttl`
    ///
    /// Fails with `DomainError::Config` when `now + ttl` is not a
    /// representable timestamp.
    pub fn new(
        kind: TokenKind,
        subject: impl Into<String>,
        user_id: i64,
        roles: Vec<String>,
        issuer: impl Into<String>,
        ttl: Duration,
    ) -> Result<Self, DomainError> {
        let now = Utc::now();
        let expiry = expiry_after(now, ttl)?;

        Ok(Self {
            sub: subject.into(),
            user_id,
            roles,
            kind,
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            iss: issuer.into(),
            jti: Uuid::new_v4().to_string(),
        })
    }

    /// Checks if the claims have expired at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }
}

/// `now + ttl`, rejected when it falls outside the timestamp range
pub(crate) fn expiry_after(now: DateTime<Utc>, ttl: Duration) -> Result<DateTime<Utc>, DomainError> {
    now.checked_add_signed(ttl).ok_or_else(|| DomainError::Config {
        message: format!("Token lifetime of {}s is out of range", ttl.num_seconds()),
    })
}

/// Accepts a JSON integer or a plain numeric string; everything else fails.
fn deserialize_user_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    struct UserIdVisitor;

    impl<'de> Visitor<'de> for UserIdVisitor {
        type Value = i64;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            f.write_str("an integer user id or a numeric string")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<i64, E> {
            Ok(v)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<i64, E> {
            i64::try_from(v).map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &self))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<i64, E> {
            let digits = v.strip_prefix('-').unwrap_or(v);
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(E::invalid_value(de::Unexpected::Str(v), &self));
            }
            v.parse()
                .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
        }
    }

    deserializer.deserialize_any(UserIdVisitor)
}

/// Issued-token record owned by the token store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    /// Unique identifier for the record
    pub id: Uuid,

    /// User this token belongs to
    pub user_id: i64,

    /// Signed token string, globally unique
    pub value: String,

    /// Token purpose
    pub kind: TokenKind,

    /// Timestamp when the token was stored
    pub created_at: DateTime<Utc>,

    /// Timestamp when the token expires; never changes after creation
    pub expires_at: DateTime<Utc>,

    /// Whether the token has been revoked; never reverts
    pub revoked: bool,
}

impl TokenRecord {
    /// Creates a fresh, unrevoked record expiring `ttl` from now
    pub fn new(
        user_id: i64,
        value: impl Into<String>,
        kind: TokenKind,
        ttl: Duration,
    ) -> Result<Self, DomainError> {
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            user_id,
            value: value.into(),
            kind,
            created_at: now,
            expires_at: expiry_after(now, ttl)?,
            revoked: false,
        })
    }

    /// A record is usable iff it is not revoked and `now < expires_at`
    pub fn is_usable_at(&self, now: DateTime<Utc>) -> bool {
        !self.revoked && now < self.expires_at
    }

    /// Usable right now
    pub fn is_usable(&self) -> bool {
        self.is_usable_at(Utc::now())
    }

    /// Revokes the record
    pub fn revoke(&mut self) {
        self.revoked = true;
    }
}
