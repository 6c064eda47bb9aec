use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::LoginRequest;
use crate::handlers::{handle_domain_error, handle_validation_errors};

use st_core::repositories::{TokenRepository, UserDirectory};
use st_core::services::EventSink;

use super::AppState;

/// Handler for POST /api/v1/auth/login
///
/// # Request Body
///
/// ```json
/// { "email": "a@x.com", "password": "secret" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "accessToken": "eyJ...",
///     "refreshToken": "eyJ...",
///     "userId": 1,
///     "email": "a@x.com",
///     "roles": ["USER"]
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Malformed email or empty password
/// - 401 Unauthorized: `INVALID_CREDENTIALS`, whatever the actual cause
/// - 500 Internal Server Error: Issued tokens could not be stored
pub async fn login<U, R, E>(
    state: web::Data<AppState<U, R, E>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    U: UserDirectory + 'static,
    R: TokenRepository + 'static,
    E: EventSink + 'static,
{
    if let Err(errors) = request.validate() {
        return handle_validation_errors(errors);
    }

    match state
        .session_service
        .login(&request.email, &request.password)
        .await
    {
        Ok(bundle) => HttpResponse::Ok().json(bundle),
        Err(error) => handle_domain_error(error),
    }
}
