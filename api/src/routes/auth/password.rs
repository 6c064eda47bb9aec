//! Password reset endpoints

use actix_web::{web, HttpResponse};
use tracing::{error, info};
use validator::Validate;

use crate::dto::{PasswordResetConfirmRequest, PasswordResetRequest, ResetVerifyQuery};
use crate::handlers::handle_validation_errors;

use st_core::repositories::{TokenRepository, UserDirectory};
use st_core::services::EventSink;
use st_shared::types::ApiResponse;

use super::AppState;

const RESET_REQUESTED_MESSAGE: &str = "If the email exists, a reset link was sent";

/// Handler for POST /api/v1/auth/password/reset-request
///
/// Answers the same 200 whether or not the account exists. Internal
/// failures are logged and hidden behind the same answer.
pub async fn request_reset<U, R, E>(
    state: web::Data<AppState<U, R, E>>,
    request: web::Json<PasswordResetRequest>,
) -> HttpResponse
where
    U: UserDirectory + 'static,
    R: TokenRepository + 'static,
    E: EventSink + 'static,
{
    if let Err(errors) = request.validate() {
        return handle_validation_errors(errors);
    }

    if let Err(e) = state.session_service.request_password_reset(&request.email).await {
        error!(error = %e, "Password reset request failed");
    }

    HttpResponse::Ok().json(ApiResponse::success(RESET_REQUESTED_MESSAGE))
}

/// Handler for GET /api/v1/auth/password/reset/verify?token=
///
/// ```json
/// { "valid": true, "expiresAt": "2026-10-25T02:00:00Z" }
/// ```
pub async fn verify_reset<U, R, E>(
    state: web::Data<AppState<U, R, E>>,
    query: web::Query<ResetVerifyQuery>,
) -> HttpResponse
where
    U: UserDirectory + 'static,
    R: TokenRepository + 'static,
    E: EventSink + 'static,
{
    let status = state.session_service.verify_reset_token(&query.token).await;
    HttpResponse::Ok().json(status)
}

/// Handler for POST /api/v1/auth/password/reset
///
/// # Request Body
///
/// ```json
/// { "token": "eyJ...", "newPassword": "...", "confirmPassword": "..." }
/// ```
///
/// Outcomes are reported in the body with status 200; only malformed input
/// gets a 400.
pub async fn reset_password<U, R, E>(
    state: web::Data<AppState<U, R, E>>,
    request: web::Json<PasswordResetConfirmRequest>,
) -> HttpResponse
where
    U: UserDirectory + 'static,
    R: TokenRepository + 'static,
    E: EventSink + 'static,
{
    if let Err(errors) = request.validate() {
        return handle_validation_errors(errors);
    }

    if !request.passwords_match() {
        return HttpResponse::Ok().json(ApiResponse::error("Passwords do not match"));
    }

    match state
        .session_service
        .reset_password(&request.token, &request.new_password)
        .await
    {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::success("Password reset successful")),
        Err(e) if e.is_rejection() => {
            info!(error = %e, "Password reset rejected");
            HttpResponse::Ok().json(ApiResponse::error("Invalid or expired reset token"))
        }
        Err(e) => {
            error!(error = %e, "Password reset failed");
            HttpResponse::Ok().json(ApiResponse::error("Password reset failed"))
        }
    }
}
