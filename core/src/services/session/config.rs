//! Configuration for the session service

use std::time::Duration;

/// Configuration for the session service
#[derive(Debug, Clone)]
pub struct SessionServiceConfig {
    /// Upper bound on a single background event delivery
    pub event_publish_timeout: Duration,
}

impl Default for SessionServiceConfig {
    fn default() -> Self {
        Self {
            event_publish_timeout: Duration::from_secs(2),
        }
    }
}
