//! Repository and collaborator traits, with in-process implementations.

pub mod token;
pub mod user;

pub use token::{InMemoryTokenRepository, TokenRepository};
pub use user::{InMemoryUserDirectory, UserDirectory};
