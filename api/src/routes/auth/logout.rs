use actix_web::{http::header::AUTHORIZATION, web, HttpRequest, HttpResponse};
use tracing::{error, info};

use st_core::repositories::{TokenRepository, UserDirectory};
use st_core::services::EventSink;
use st_shared::types::ApiResponse;

use super::AppState;

/// Handler for POST /api/v1/auth/logout
///
/// Revokes the presented token and every other usable token of its owner.
/// A token that no longer decodes still logs out successfully.
///
/// # Headers
///
/// ```text
/// Authorization: Bearer {token}
/// ```
///
/// # Response
///
/// - 200 OK: `{"success": true, "message": "Logout successful"}`
/// - 400 Bad Request: Missing or non-Bearer `Authorization` header
/// - 500 Internal Server Error: Token store unavailable
pub async fn logout<U, R, E>(
    req: HttpRequest,
    state: web::Data<AppState<U, R, E>>,
) -> HttpResponse
where
    U: UserDirectory + 'static,
    R: TokenRepository + 'static,
    E: EventSink + 'static,
{
    let token = match extract_bearer_token(&req) {
        Some(token) => token,
        None => {
            info!("Logout without bearer token");
            return HttpResponse::BadRequest().json(ApiResponse::error(
                "Authorization token missing or invalid",
            ));
        }
    };

    match state.session_service.logout(token).await {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::success("Logout successful")),
        Err(error) if error.is_rejection() => {
            info!(error = %error, "Logout rejected");
            HttpResponse::BadRequest().json(ApiResponse::error("Logout failed"))
        }
        Err(error) => {
            error!(error = %error, "Logout failed");
            HttpResponse::InternalServerError().json(ApiResponse::error("Logout failed"))
        }
    }
}

fn extract_bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
