//! Out-of-band delivery of session events
//!
//! Login notices and password-reset links leave the token core through an
//! `EventSink`. Delivery is fire-and-forget: a failed publish is logged and
//! never fails the flow that produced it.

mod sinks;
mod traits;

pub use sinks::{InMemoryEventSink, TracingEventSink};
pub use traits::EventSink;
