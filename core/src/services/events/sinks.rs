//! In-process event sinks

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

use crate::domain::events::SessionEvent;
use crate::errors::DomainError;

use super::traits::EventSink;

/// Sink that only writes events to the log
///
/// Used when no message broker is configured. Reset tokens are not logged.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink;

#[async_trait]
impl EventSink for TracingEventSink {
    async fn publish(&self, event: &SessionEvent) -> Result<(), DomainError> {
        match event {
            SessionEvent::LoginSucceeded { user_id, occurred_at, .. } => {
                info!(event = event.name(), user_id, %occurred_at, "Session event");
            }
            SessionEvent::PasswordResetRequested { occurred_at, .. } => {
                info!(event = event.name(), %occurred_at, "Session event");
            }
        }
        Ok(())
    }
}

/// Sink that keeps every published event, for tests and local runs
#[derive(Debug, Clone, Default)]
pub struct InMemoryEventSink {
    events: Arc<Mutex<Vec<SessionEvent>>>,
}

impl InMemoryEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events published so far
    pub async fn events(&self) -> Vec<SessionEvent> {
        self.events.lock().await.clone()
    }
}

#[async_trait]
impl EventSink for InMemoryEventSink {
    async fn publish(&self, event: &SessionEvent) -> Result<(), DomainError> {
        self.events.lock().await.push(event.clone());
        Ok(())
    }
}
