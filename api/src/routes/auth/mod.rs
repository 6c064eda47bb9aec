//! Authentication route handlers
//!
//! This module contains the session endpoints mounted under `/api/v1/auth`:
//! - Login and logout
//! - Access token refresh
//! - Token validation for other services
//! - Password reset request, verification and confirmation

pub mod login;
pub mod logout;
pub mod password;
pub mod refresh;
pub mod validate;

use std::sync::Arc;

use st_core::repositories::{TokenRepository, UserDirectory};
use st_core::services::{EventSink, SessionService};

/// Application state that holds shared services
pub struct AppState<U, R, E>
where
    U: UserDirectory,
    R: TokenRepository,
    E: EventSink,
{
    pub session_service: Arc<SessionService<U, R, E>>,
}

impl<U, R, E> AppState<U, R, E>
where
    U: UserDirectory,
    R: TokenRepository,
    E: EventSink,
{
    pub fn new(session_service: Arc<SessionService<U, R, E>>) -> Self {
        Self { session_service }
    }
}
