//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - Token signing, lifetimes and the expired-token sweep
//! - `cache` - Redis connection used for session events
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection and logging configuration
//! - `server` - HTTP server configuration

pub mod auth;
pub mod cache;
pub mod database;
pub mod environment;
pub mod server;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use auth::{AuthConfig, CleanupConfig, JwtConfig};
pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use server::ServerConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration. `None` runs with in-memory token storage.
    #[serde(default)]
    pub database: Option<DatabaseConfig>,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// Redis configuration for the event sink. `None` logs events instead.
    #[serde(default)]
    pub cache: Option<CacheConfig>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            database: None,
            auth: AuthConfig::default(),
            cache: None,
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// `DATABASE_URL` and `REDIS_URL` are optional; when absent the
    /// corresponding backend falls back to its in-process implementation.
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        Self {
            environment,
            server: ServerConfig::from_env(),
            database: std::env::var("DATABASE_URL")
                .ok()
                .map(|_| DatabaseConfig::from_env()),
            auth: AuthConfig::from_env(),
            cache: std::env::var("REDIS_URL").ok().map(|_| CacheConfig::from_env()),
            logging: LoggingConfig::from_env(environment),
        }
    }

    /// Warnings worth surfacing at startup
    pub fn startup_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.auth.jwt.is_using_default_secret() {
            warnings.push("JWT_SECRET is not set; using the development secret".to_string());
        }
        if self.environment.is_production() && self.database.is_none() {
            warnings.push("DATABASE_URL is not set; tokens are kept in memory".to_string());
        }
        warnings
    }
}
