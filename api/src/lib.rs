//! HTTP surface of the SmartTransit auth token core
//!
//! Exposed as a library so integration tests can build the application
//! around in-memory backends.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod telemetry;
