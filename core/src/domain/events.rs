//! Out-of-band session events handed to the external delivery channel.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Event emitted by the session flows
///
/// Delivery is at-most-once; nothing in the token core waits on a consumer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// A user authenticated successfully
    LoginSucceeded {
        user_id: i64,
        email: String,
        occurred_at: DateTime<Utc>,
    },
    /// A password reset was requested for an existing account
    PasswordResetRequested {
        email: String,
        token: String,
        occurred_at: DateTime<Utc>,
    },
}

impl SessionEvent {
    pub fn login_succeeded(user_id: i64, email: impl Into<String>) -> Self {
        SessionEvent::LoginSucceeded {
            user_id,
            email: email.into(),
            occurred_at: Utc::now(),
        }
    }

    pub fn password_reset_requested(email: impl Into<String>, token: impl Into<String>) -> Self {
        SessionEvent::PasswordResetRequested {
            email: email.into(),
            token: token.into(),
            occurred_at: Utc::now(),
        }
    }

    /// Short name used in logs and as a routing key
    pub fn name(&self) -> &'static str {
        match self {
            SessionEvent::LoginSucceeded { .. } => "login_succeeded",
            SessionEvent::PasswordResetRequested { .. } => "password_reset_requested",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serializes_with_type_tag() {
        let event = SessionEvent::password_reset_requested("a@x.com", "tok");
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["type"], "password_reset_requested");
        assert_eq!(json["email"], "a@x.com");
        assert_eq!(json["token"], "tok");
    }

    #[test]
    fn test_event_names() {
        assert_eq!(SessionEvent::login_succeeded(1, "a@x.com").name(), "login_succeeded");
        assert_eq!(
            SessionEvent::password_reset_requested("a@x.com", "tok").name(),
            "password_reset_requested"
        );
    }
}
