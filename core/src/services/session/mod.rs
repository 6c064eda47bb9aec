//! Session service module
//!
//! Orchestrates login, logout, refresh and password-reset flows on top of
//! the token components and the external user directory.

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::SessionServiceConfig;
pub use service::SessionService;
