//! Combined stateless and stateful token verification

use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::entities::token::{Claims, TokenKind, TokenRecord};
use crate::domain::value_objects::TokenDetails;
use crate::errors::TokenError;
use crate::repositories::TokenRepository;

use super::codec::TokenCodec;
use super::store::TokenStore;

/// A token that passed every check
#[derive(Debug, Clone)]
pub struct VerifiedToken {
    pub claims: Claims,
    pub record: TokenRecord,
}

/// Produces a single validity verdict from the codec and the store
///
/// A token is valid iff it decodes with `exp > now` and its stored record
/// is usable. A token missing from the store is never valid.
pub struct TokenValidator<R: TokenRepository> {
    codec: Arc<TokenCodec>,
    store: Arc<TokenStore<R>>,
}

impl<R: TokenRepository> Clone for TokenValidator<R> {
    fn clone(&self) -> Self {
        Self {
            codec: Arc::clone(&self.codec),
            store: Arc::clone(&self.store),
        }
    }
}

impl<R: TokenRepository> TokenValidator<R> {
    pub fn new(codec: Arc<TokenCodec>, store: Arc<TokenStore<R>>) -> Self {
        Self { codec, store }
    }

    /// Verify a token of any kind, reporting the precise failure
    pub async fn verify(&self, value: &str) -> Result<VerifiedToken, TokenError> {
        let claims = self.codec.decode(value)?;
        self.check_store(value, claims).await
    }

    /// Verify a token and require both payload and record to be of `expected` kind
    pub async fn verify_kind(&self, value: &str, expected: TokenKind) -> Result<VerifiedToken, TokenError> {
        let claims = self.codec.decode(value)?;
        if claims.kind != expected {
            return Err(TokenError::TypeMismatch);
        }

        let verified = self.check_store(value, claims).await?;
        if verified.record.kind != expected {
            warn!(
                user_id = verified.record.user_id,
                "Stored token kind disagrees with its payload"
            );
            return Err(TokenError::TypeMismatch);
        }
        Ok(verified)
    }

    pub async fn validate(&self, value: &str) -> bool {
        match self.verify(value).await {
            Ok(_) => true,
            Err(e) => {
                debug!(reason = %e, "Token rejected");
                false
            }
        }
    }

    pub async fn validate_kind(&self, value: &str, expected: TokenKind) -> bool {
        match self.verify_kind(value, expected).await {
            Ok(_) => true,
            Err(e) => {
                debug!(reason = %e, expected = %expected, "Token rejected");
                false
            }
        }
    }

    /// Identity carried by a valid token; `{valid: false}` on any failure
    pub async fn details_or_invalid(&self, value: &str) -> TokenDetails {
        match self.verify(value).await {
            Ok(verified) => TokenDetails::from_claims(&verified.claims),
            Err(e) => {
                debug!(reason = %e, "Token rejected");
                TokenDetails::invalid()
            }
        }
    }

    async fn check_store(&self, value: &str, claims: Claims) -> Result<VerifiedToken, TokenError> {
        let record = self
            .store
            .find(value)
            .await
            .map_err(|e| {
                warn!(error = %e, "Token store lookup failed");
                TokenError::StoreUnavailable
            })?
            .ok_or(TokenError::NotFound)?;

        if record.revoked {
            return Err(TokenError::Revoked);
        }
        if !record.is_usable_at(Utc::now()) {
            return Err(TokenError::Expired);
        }
        if record.user_id != claims.user_id {
            warn!(
                record_user_id = record.user_id,
                claims_user_id = claims.user_id,
                "Stored token owner disagrees with its payload"
            );
            return Err(TokenError::Malformed);
        }

        Ok(VerifiedToken { claims, record })
    }
}
