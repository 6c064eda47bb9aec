//! Domain layer containing business entities, value objects, and domain events.

pub mod entities;
pub mod events;
pub mod value_objects;

// Re-export commonly used domain types
pub use entities::{Claims, TokenKind, TokenRecord, User};
pub use events::SessionEvent;
pub use value_objects::{ResetTokenStatus, TokenBundle, TokenDetails};
