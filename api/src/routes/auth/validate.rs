use actix_web::{web, HttpResponse};
use tracing::debug;

use crate::dto::ValidateTokenRequest;

use st_core::domain::TokenDetails;
use st_core::repositories::{TokenRepository, UserDirectory};
use st_core::services::EventSink;

use super::AppState;

/// Handler for POST /api/v1/auth/validate
///
/// Always answers 200. An invalid token, or a body that cannot be read as
/// `{"token": "..."}`, yields `{"valid": false}` with no identity fields.
pub async fn validate<U, R, E>(
    state: web::Data<AppState<U, R, E>>,
    request: Result<web::Json<ValidateTokenRequest>, actix_web::Error>,
) -> HttpResponse
where
    U: UserDirectory + 'static,
    R: TokenRepository + 'static,
    E: EventSink + 'static,
{
    let request = match request {
        Ok(request) => request,
        Err(e) => {
            debug!(error = %e, "Unreadable validate request");
            return HttpResponse::Ok().json(TokenDetails::invalid());
        }
    };

    let details = state.session_service.validate(&request.token).await;
    HttpResponse::Ok().json(details)
}
