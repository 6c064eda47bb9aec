//! Redis configuration module

use serde::{Deserialize, Serialize};

/// Redis connection configuration, used for publishing session events
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Redis connection URL
    pub url: String,

    /// Connection timeout in seconds
    pub connection_timeout: u64,

    /// Pub/sub channel receiving login and password-reset events
    #[serde(default = "default_events_channel")]
    pub events_channel: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: String::from("redis://localhost:6379"),
            connection_timeout: 5,
            events_channel: default_events_channel(),
        }
    }
}

impl CacheConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let url = std::env::var("REDIS_URL")
            .unwrap_or_else(|_| "redis://localhost:6379".to_string());
        let events_channel = std::env::var("EVENTS_CHANNEL")
            .unwrap_or_else(|_| default_events_channel());

        Self {
            url,
            events_channel,
            ..Default::default()
        }
    }

    /// Create a new cache configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }
}

fn default_events_channel() -> String {
    String::from("auth.session-events")
}
