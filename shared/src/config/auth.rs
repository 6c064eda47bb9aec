//! Authentication and token lifecycle configuration

use serde::{Deserialize, Serialize};

const DEFAULT_SECRET: &str = "smart-transit-development-secret";

/// JWT signing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,

    /// Access token expiry time in seconds
    pub access_token_expiry: i64,

    /// Refresh token expiry time in seconds
    pub refresh_token_expiry: i64,

    /// JWT issuer claim
    pub issuer: String,

    /// Algorithm for JWT signing (default: HS512)
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_SECRET),
            access_token_expiry: 900,     // 15 minutes
            refresh_token_expiry: 604800, // 7 days
            issuer: String::from("smart-transit"),
            algorithm: default_algorithm(),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            secret: std::env::var("JWT_SECRET").unwrap_or_else(|_| DEFAULT_SECRET.to_string()),
            access_token_expiry: env_parse("JWT_ACCESS_TOKEN_EXPIRY", 900),
            refresh_token_expiry: env_parse("JWT_REFRESH_TOKEN_EXPIRY", 604800),
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "smart-transit".to_string()),
            algorithm: std::env::var("JWT_ALGORITHM").unwrap_or_else(|_| default_algorithm()),
        }
    }

    /// Set access token expiry in seconds
    pub fn with_access_expiry_seconds(mut self, seconds: i64) -> Self {
        self.access_token_expiry = seconds;
        self
    }

    /// Set refresh token expiry in seconds
    pub fn with_refresh_expiry_seconds(mut self, seconds: i64) -> Self {
        self.refresh_token_expiry = seconds;
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_SECRET
    }
}

/// Schedule for the expired-token sweep
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CleanupConfig {
    /// Whether to run the background sweep at all
    pub enabled: bool,

    /// Seconds between sweeps
    pub interval_seconds: u64,

    /// UTC hour of the first sweep. `None` runs immediately on startup.
    #[serde(default)]
    pub run_at_hour_utc: Option<u32>,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_seconds: 86400, // daily
            run_at_hour_utc: Some(2),
        }
    }
}

impl CleanupConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            enabled: env_parse("TOKEN_CLEANUP_ENABLED", defaults.enabled),
            interval_seconds: env_parse("TOKEN_CLEANUP_INTERVAL_SECONDS", defaults.interval_seconds),
            run_at_hour_utc: match std::env::var("TOKEN_CLEANUP_HOUR_UTC") {
                Ok(raw) if raw.eq_ignore_ascii_case("none") => None,
                Ok(raw) => raw.parse().ok().filter(|h| *h < 24).or(defaults.run_at_hour_utc),
                Err(_) => defaults.run_at_hour_utc,
            },
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Expired-token sweep schedule
    #[serde(default)]
    pub cleanup: CleanupConfig,
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            jwt: JwtConfig::from_env(),
            cleanup: CleanupConfig::from_env(),
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn default_algorithm() -> String {
    String::from("HS512")
}
