//! Main session service implementation

use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::domain::entities::token::{TokenKind, TokenRecord};
use crate::domain::entities::user::User;
use crate::domain::events::SessionEvent;
use crate::domain::value_objects::{ResetTokenStatus, TokenBundle, TokenDetails};
use crate::errors::{AuthError, DomainError, DomainResult, TokenError};
use crate::repositories::{TokenRepository, UserDirectory};
use crate::services::events::EventSink;
use crate::services::token::{TokenCodec, TokenStore, TokenValidator};

use super::config::SessionServiceConfig;

/// Well-formed cost-12 bcrypt hash checked against when no account matches,
/// so unknown emails cost as much as a wrong password
pub(super) const UNKNOWN_ACCOUNT_HASH: &str = "$2a$12$R9h/cIPz0gi.URNNX3kh2OPST9/PgBkqquzi.Ss7KIUgO2t0jWMUW";

/// Session service driving every token-issuing and token-revoking flow
///
/// Token records move `USABLE -> REVOKED` or `USABLE -> EXPIRED`; nothing
/// here ever makes a record usable again.
pub struct SessionService<U, R, E>
where
    U: UserDirectory,
    R: TokenRepository,
    E: EventSink,
{
    /// External account store
    users: Arc<U>,
    /// Signs and decodes tokens
    codec: Arc<TokenCodec>,
    /// Issued-token records
    store: Arc<TokenStore<R>>,
    /// Combined validity checks
    validator: TokenValidator<R>,
    /// Out-of-band notifications
    events: Arc<E>,
    /// Service configuration
    config: SessionServiceConfig,
}

impl<U, R, E> SessionService<U, R, E>
where
    U: UserDirectory,
    R: TokenRepository,
    E: EventSink + 'static,
{
    /// Create a new session service
    ///
    /// # Arguments
    ///
    /// * `users` - Directory used to look up accounts and check passwords
    /// * `codec` - Codec built once from the signing configuration
    /// * `store` - Store of issued tokens, shared with the cleanup job
    /// * `events` - Sink for login and password-reset events
    /// * `config` - Service configuration
    pub fn new(
        users: Arc<U>,
        codec: Arc<TokenCodec>,
        store: Arc<TokenStore<R>>,
        events: Arc<E>,
        config: SessionServiceConfig,
    ) -> Self {
        let validator = TokenValidator::new(Arc::clone(&codec), Arc::clone(&store));
        Self {
            users,
            codec,
            store,
            validator,
            events,
            config,
        }
    }

    /// Validator sharing this service's codec and store
    pub fn validator(&self) -> &TokenValidator<R> {
        &self.validator
    }

    /// Authenticate with email and password and issue a token pair
    ///
    /// Unknown email, inactive account and wrong password all fail with the
    /// same `InvalidCredentials` error, and all pay for one password check.
    ///
    /// # Returns
    ///
    /// * `Ok(TokenBundle)` - Fresh access and refresh tokens, both stored
    /// * `Err(DomainError)` - `InvalidCredentials`, or an internal error if
    ///   the tokens could not be stored
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<TokenBundle> {
        let user = match self.users.find_by_email(email).await? {
            Some(user) => user,
            None => {
                let placeholder = User::new(0, email, UNKNOWN_ACCOUNT_HASH, Vec::<String>::new());
                if let Err(e) = self.users.verify_password(&placeholder, password).await {
                    debug!(error = %e, "Placeholder password check failed");
                }
                info!("Login failed: unknown account");
                return Err(AuthError::InvalidCredentials.into());
            }
        };

        if !self.users.verify_password(&user, password).await? {
            info!(user_id = user.id, "Login failed: password mismatch");
            return Err(AuthError::InvalidCredentials.into());
        }

        if !user.active {
            info!(user_id = user.id, "Login failed: account inactive");
            return Err(AuthError::InvalidCredentials.into());
        }

        let roles = user.role_list();
        let access_token = self.issue(TokenKind::Access, &user.email, user.id, &roles).await?;
        let refresh_token = self.issue(TokenKind::Refresh, &user.email, user.id, &roles).await?;

        info!(user_id = user.id, "User logged in");
        self.publish(SessionEvent::login_succeeded(user.id, &user.email));

        Ok(TokenBundle {
            access_token,
            refresh_token,
            user_id: user.id,
            email: user.email,
            roles,
        })
    }

    /// Revoke the presented token and, when it decodes, every session of its owner
    ///
    /// Undecodable tokens still succeed; only a store failure is an error.
    pub async fn logout(&self, token: &str) -> DomainResult<()> {
        self.store.revoke(token).await.map_err(store_unavailable)?;

        match self.codec.decode(token) {
            Ok(claims) => {
                self.store
                    .revoke_all(claims.user_id)
                    .await
                    .map_err(store_unavailable)?;
                info!(user_id = claims.user_id, "User logged out");
            }
            Err(e) => {
                debug!(reason = %e, "Logout with undecodable token");
            }
        }

        Ok(())
    }

    /// Mint a new access token from a valid refresh token
    ///
    /// The refresh token is returned unchanged; it is not rotated.
    ///
    /// # Returns
    ///
    /// * `Ok(TokenBundle)` - New access token plus the same refresh token
    /// * `Err(DomainError)` - `InvalidOrExpired`, `TypeMismatch`,
    ///   `UserNotFound`, or an internal error
    pub async fn refresh(&self, refresh_token: &str) -> DomainResult<TokenBundle> {
        let verified = self
            .validator
            .verify_kind(refresh_token, TokenKind::Refresh)
            .await
            .map_err(|e| {
                info!(reason = %e, "Refresh rejected");
                DomainError::Token(e.coarse())
            })?;
        let claims = verified.claims;

        let roles = if claims.roles.is_empty() {
            self.users
                .find_by_id(claims.user_id)
                .await?
                .ok_or(AuthError::UserNotFound)?
                .role_list()
        } else {
            claims.roles
        };

        let access_token = self
            .issue(TokenKind::Access, &claims.sub, claims.user_id, &roles)
            .await?;

        debug!(user_id = claims.user_id, "Access token refreshed");

        Ok(TokenBundle {
            access_token,
            refresh_token: refresh_token.to_string(),
            user_id: claims.user_id,
            email: claims.sub,
            roles,
        })
    }

    /// Issue a reset token for an existing account and hand it to the event sink
    ///
    /// Unknown emails succeed silently so the caller cannot probe for accounts.
    pub async fn request_password_reset(&self, email: &str) -> DomainResult<()> {
        let user = match self.users.find_by_email(email).await? {
            Some(user) => user,
            None => {
                info!("Password reset requested for unknown account");
                return Ok(());
            }
        };

        // Reset tokens share the refresh kind and lifetime
        let token = self
            .issue(TokenKind::Refresh, &user.email, user.id, &user.role_list())
            .await?;

        info!(user_id = user.id, "Password reset token issued");
        self.publish(SessionEvent::password_reset_requested(&user.email, token));

        Ok(())
    }

    /// Whether a reset token is still usable, and until when
    pub async fn verify_reset_token(&self, token: &str) -> ResetTokenStatus {
        match self.validator.verify(token).await {
            Ok(verified) => ResetTokenStatus {
                valid: true,
                expires_at: Some(verified.record.expires_at),
            },
            Err(e) => {
                debug!(reason = %e, "Reset token rejected");
                ResetTokenStatus::invalid()
            }
        }
    }

    /// Set a new password using a reset token, then revoke every session
    pub async fn reset_password(&self, token: &str, new_password: &str) -> DomainResult<()> {
        if new_password.is_empty() {
            return Err(DomainError::Validation {
                message: "New password must not be empty".to_string(),
            });
        }

        let verified = self.validator.verify(token).await.map_err(|e| {
            info!(reason = %e, "Password reset rejected");
            DomainError::Token(e.coarse())
        })?;

        let user = self
            .users
            .find_by_email(&verified.claims.sub)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        self.users.update_password_hash(user.id, new_password).await?;
        self.store.revoke(token).await.map_err(store_unavailable)?;
        self.store.revoke_all(user.id).await.map_err(store_unavailable)?;

        info!(user_id = user.id, "Password reset completed");
        Ok(())
    }

    /// Identity carried by a token, or `{valid: false}`
    pub async fn validate(&self, token: &str) -> TokenDetails {
        self.validator.details_or_invalid(token).await
    }

    /// Usable tokens currently held by a user
    pub async fn active_sessions(&self, user_id: i64) -> DomainResult<Vec<TokenRecord>> {
        self.store.find_usable(user_id).await.map_err(store_unavailable)
    }

    /// Sign a token and store it; the token is only returned once stored
    async fn issue(
        &self,
        kind: TokenKind,
        subject: &str,
        user_id: i64,
        roles: &[String],
    ) -> DomainResult<String> {
        let token = self
            .codec
            .encode(kind, subject, user_id, roles, self.store.ttl_for(kind))?;

        self.store.put(user_id, &token, kind).await.map_err(|e| {
            error!(user_id, kind = %kind, error = %e, "Issued token could not be stored");
            DomainError::internal("Failed to persist issued token")
        })?;

        Ok(token)
    }

    /// Hand the event to a background task; delivery is bounded by the
    /// configured timeout and never delays the calling flow
    fn publish(&self, event: SessionEvent) {
        let events = Arc::clone(&self.events);
        let timeout = self.config.event_publish_timeout;

        tokio::spawn(async move {
            let name = event.name();
            match tokio::time::timeout(timeout, events.publish(&event)).await {
                Ok(Ok(())) => debug!(event = name, "Session event published"),
                Ok(Err(e)) => warn!(event = name, error = %e, "Failed to publish session event"),
                Err(_) => warn!(event = name, "Timed out publishing session event"),
            }
        });
    }
}

fn store_unavailable(err: DomainError) -> DomainError {
    error!(error = %err, "Token store operation failed");
    TokenError::StoreUnavailable.into()
}
