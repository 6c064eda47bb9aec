//! Request and response bodies for the HTTP surface

pub mod auth;

pub use auth::{
    LoginRequest, PasswordResetConfirmRequest, PasswordResetRequest, RefreshTokenRequest,
    RefreshTokenResponse, ResetVerifyQuery, ValidateTokenRequest,
};
pub use st_shared::errors::ErrorResponse;
