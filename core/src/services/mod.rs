//! Business services containing domain logic and use cases.

pub mod events;
pub mod session;
pub mod token;

// Re-export commonly used types
pub use events::{EventSink, InMemoryEventSink, TracingEventSink};
pub use session::{SessionService, SessionServiceConfig};
pub use token::{
    CleanupResult, TokenCleanupService, TokenCodec, TokenServiceConfig, TokenStore,
    TokenValidator, VerifiedToken,
};
