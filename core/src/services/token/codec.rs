//! Signed-token encoding and stateless verification

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::Serialize;
use st_shared::config::JwtConfig;
use tracing::debug;

use crate::domain::entities::token::{Claims, TokenKind};
use crate::errors::{DecodeError, DomainError};

use super::config::TokenServiceConfig;

/// Pad byte appended to secrets shorter than the algorithm minimum
const SECRET_PAD_BYTE: u8 = b'0';

/// Encodes claims into compact signed tokens and verifies them back
///
/// Built once from configuration and shared; the keys never change after
/// construction.
pub struct TokenCodec {
    algorithm: Algorithm,
    issuer: String,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &self.algorithm)
            .field("issuer", &self.issuer)
            .finish_non_exhaustive()
    }
}

impl TokenCodec {
    /// Creates a codec from JWT settings
    ///
    /// # Returns
    ///
    /// * `Ok(TokenCodec)` - Ready to sign and verify
    /// * `Err(DomainError::Config)` - Empty secret, a non-HMAC algorithm, or
    ///   a token lifetime that is not positive or not representable
    pub fn new(config: &JwtConfig) -> Result<Self, DomainError> {
        if config.secret.is_empty() {
            return Err(DomainError::Config {
                message: "JWT secret must not be empty".to_string(),
            });
        }

        TokenServiceConfig::from_jwt_config(config)?;

        let algorithm: Algorithm = config.algorithm.parse().map_err(|_| DomainError::Config {
            message: format!("Unknown JWT algorithm: {}", config.algorithm),
        })?;
        let min_len = min_secret_len(algorithm).ok_or_else(|| DomainError::Config {
            message: format!("Unsupported JWT algorithm: {}", config.algorithm),
        })?;

        let secret = padded_secret(config.secret.as_bytes(), min_len);

        let mut validation = Validation::new(algorithm);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.leeway = 0;
        validation.validate_exp = true;

        Ok(Self {
            algorithm,
            issuer: config.issuer.clone(),
            encoding_key: EncodingKey::from_secret(&secret),
            decoding_key: DecodingKey::from_secret(&secret),
            validation,
        })
    }

    /// Mints a signed token of `kind` living for `ttl`
    pub fn encode(
        &self,
        kind: TokenKind,
        subject: &str,
        user_id: i64,
        roles: &[String],
        ttl: Duration,
    ) -> Result<String, DomainError> {
        let claims = Claims::new(kind, subject, user_id, roles.to_vec(), &self.issuer, ttl)?;
        self.sign(&claims)
    }

    /// Signs an arbitrary payload with the codec's key
    pub(crate) fn sign<T: Serialize>(&self, payload: &T) -> Result<String, DomainError> {
        encode(&Header::new(self.algorithm), payload, &self.encoding_key).map_err(|e| {
            DomainError::Config {
                message: format!("Failed to sign token: {}", e),
            }
        })
    }

    /// Verifies signature, issuer and expiry, and returns the claims
    ///
    /// `Expired` is reported only for well-formed, correctly signed tokens
    /// whose `exp` is at or before now. Every other failure is `Malformed`.
    pub fn decode(&self, token: &str) -> Result<Claims, DecodeError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => DecodeError::Expired,
                other => {
                    debug!(error = ?other, "Token failed to decode");
                    DecodeError::Malformed
                }
            }
        })?;

        if data.claims.is_expired_at(Utc::now()) {
            return Err(DecodeError::Expired);
        }

        Ok(data.claims)
    }
}

fn min_secret_len(algorithm: Algorithm) -> Option<usize> {
    match algorithm {
        Algorithm::HS256 => Some(32),
        Algorithm::HS384 => Some(48),
        Algorithm::HS512 => Some(64),
        _ => None,
    }
}

fn padded_secret(secret: &[u8], min_len: usize) -> Vec<u8> {
    let mut key = secret.to_vec();
    if key.len() < min_len {
        key.resize(min_len, SECRET_PAD_BYTE);
    }
    key
}
