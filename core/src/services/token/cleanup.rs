//! Scheduled sweep of expired token records
//!
//! Expired records are useless for validation but keep growing the store.
//! The sweep deletes them once a day by default, first at 02:00 UTC.

use chrono::{DateTime, Duration as ChronoDuration, NaiveTime, Utc};
use st_shared::config::CleanupConfig;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{error, info, warn};

use crate::repositories::TokenRepository;

use super::store::TokenStore;

/// Service deleting expired tokens from the store
pub struct TokenCleanupService<R: TokenRepository + 'static> {
    store: Arc<TokenStore<R>>,
    config: CleanupConfig,
}

impl<R: TokenRepository + 'static> TokenCleanupService<R> {
    pub fn new(store: Arc<TokenStore<R>>, config: CleanupConfig) -> Self {
        Self { store, config }
    }

    /// Run a single cleanup cycle
    ///
    /// A failed sweep is recorded in the result and logged; it is not
    /// retried until the next scheduled run.
    pub async fn run_cleanup(&self) -> CleanupResult {
        let now = Utc::now();
        let mut result = CleanupResult {
            ran_at: Some(now),
            ..Default::default()
        };

        info!("Starting token cleanup cycle");

        match self.store.sweep_expired(now).await {
            Ok(count) => {
                result.expired_tokens_deleted = count;
                info!("Deleted {} expired tokens", count);
            }
            Err(e) => {
                error!("Failed to cleanup expired tokens: {}", e);
                result.errors.push(format!("Token cleanup error: {}", e));
            }
        }

        result
    }

    /// Delay before the first run, measured from `now`
    pub fn initial_delay(&self, now: DateTime<Utc>) -> Duration {
        match self.config.run_at_hour_utc {
            Some(hour) => delay_until_hour(now, hour),
            None => Duration::ZERO,
        }
    }

    /// Start the cleanup service as a background task
    ///
    /// Returns `None` when cleanup is disabled.
    pub fn start_background_task(self: Arc<Self>) -> Option<JoinHandle<()>> {
        if !self.config.enabled {
            warn!("Token cleanup service is disabled");
            return None;
        }

        let period = Duration::from_secs(self.config.interval_seconds.max(1));
        let delay = self.initial_delay(Utc::now());

        Some(tokio::spawn(async move {
            info!(
                "Token cleanup service started - first run in {} seconds, then every {} seconds",
                delay.as_secs(),
                period.as_secs()
            );

            let mut timer = tokio::time::interval_at(Instant::now() + delay, period);
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                timer.tick().await;

                let result = self.run_cleanup().await;
                if !result.is_success() {
                    warn!("Cleanup completed with errors: {:?}", result.errors);
                }
            }
        }))
    }
}

/// Time from `now` until the next `hour:00:00` UTC, today or tomorrow
fn delay_until_hour(now: DateTime<Utc>, hour: u32) -> Duration {
    let Some(at) = NaiveTime::from_hms_opt(hour, 0, 0) else {
        return Duration::ZERO;
    };

    let today = now.date_naive().and_time(at).and_utc();
    let next = if today > now {
        today
    } else {
        today + ChronoDuration::days(1)
    };

    (next - now).to_std().unwrap_or(Duration::ZERO)
}

/// Result of a cleanup operation
#[derive(Debug, Default)]
pub struct CleanupResult {
    /// Number of expired tokens deleted
    pub expired_tokens_deleted: usize,
    /// When the cycle started
    pub ran_at: Option<DateTime<Utc>>,
    /// Any errors encountered during cleanup
    pub errors: Vec<String>,
}

impl CleanupResult {
    /// Check if the cleanup was successful (no errors)
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}
