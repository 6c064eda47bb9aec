//! Event sink trait

use async_trait::async_trait;

use crate::domain::events::SessionEvent;
use crate::errors::DomainError;

/// Trait for publishing session events to an external channel
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Hand an event to the channel
    ///
    /// # Returns
    /// * `Ok(())` - The channel accepted the event
    /// * `Err(DomainError)` - Delivery failed; callers log and move on
    async fn publish(&self, event: &SessionEvent) -> Result<(), DomainError>;
}
