use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::{RefreshTokenRequest, RefreshTokenResponse};
use crate::handlers::{handle_domain_error, handle_validation_errors};

use st_core::repositories::{TokenRepository, UserDirectory};
use st_core::services::EventSink;

use super::AppState;

/// Handler for POST /api/v1/auth/refresh
///
/// Mints a new access token from a usable refresh token. The refresh token
/// is returned unchanged.
///
/// # Request Body
///
/// ```json
/// { "refreshToken": "eyJ..." }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "accessToken": "eyJ...", "refreshToken": "eyJ..." }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: Invalid, expired or revoked token, or an access token
/// - 404 Not Found: The token's account no longer exists
/// - 500 Internal Server Error: Token store unavailable
pub async fn refresh<U, R, E>(
    state: web::Data<AppState<U, R, E>>,
    request: web::Json<RefreshTokenRequest>,
) -> HttpResponse
where
    U: UserDirectory + 'static,
    R: TokenRepository + 'static,
    E: EventSink + 'static,
{
    if let Err(errors) = request.validate() {
        return handle_validation_errors(errors);
    }

    match state.session_service.refresh(&request.refresh_token).await {
        Ok(bundle) => HttpResponse::Ok().json(RefreshTokenResponse {
            access_token: bundle.access_token,
            refresh_token: bundle.refresh_token,
        }),
        Err(error) => handle_domain_error(error),
    }
}
