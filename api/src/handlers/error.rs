use actix_web::{error::JsonPayloadError, HttpRequest, HttpResponse};
use tracing::{error, info};
use validator::ValidationErrors;

use st_core::errors::{AuthError, DomainError, TokenError};
use st_shared::errors::{error_codes, ErrorResponse};

/// Map a domain error to an HTTP response with a generic message
///
/// Rejections are logged at info, faults at error. Neither the response
/// nor the message ever carries the underlying cause.
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    if error.is_rejection() {
        info!(error = %error, "Request rejected");
    } else {
        error!(error = ?error, "Request failed");
    }

    match error {
        DomainError::Auth(AuthError::InvalidCredentials) => HttpResponse::Unauthorized().json(
            ErrorResponse::new(error_codes::INVALID_CREDENTIALS, "Invalid credentials"),
        ),
        DomainError::Auth(AuthError::UserNotFound) => HttpResponse::NotFound()
            .json(ErrorResponse::new(error_codes::USER_NOT_FOUND, "User not found")),
        DomainError::Token(TokenError::TypeMismatch) => HttpResponse::Unauthorized().json(
            ErrorResponse::new(error_codes::TOKEN_TYPE_MISMATCH, "Wrong token type"),
        ),
        DomainError::Token(TokenError::StoreUnavailable) => internal_error(),
        DomainError::Token(_) => HttpResponse::Unauthorized().json(ErrorResponse::new(
            error_codes::INVALID_OR_EXPIRED_TOKEN,
            "Invalid or expired token",
        )),
        DomainError::Validation { message } => HttpResponse::BadRequest()
            .json(ErrorResponse::new(error_codes::VALIDATION_ERROR, message)),
        DomainError::NotFound { .. } => HttpResponse::NotFound()
            .json(ErrorResponse::new(error_codes::NOT_FOUND, "Resource not found")),
        DomainError::Config { .. } | DomainError::Internal { .. } => internal_error(),
    }
}

/// 400 with per-field messages from `validator`
pub fn handle_validation_errors(errors: ValidationErrors) -> HttpResponse {
    let mut response = ErrorResponse::new(error_codes::VALIDATION_ERROR, "Invalid request data");

    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        response = response.add_detail(field, messages);
    }

    info!(details = ?response.details, "Request validation failed");
    HttpResponse::BadRequest().json(response)
}

/// Error handler for `web::JsonConfig`, keeps malformed bodies in the shared envelope
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    info!(error = %err, "Rejected request body");

    let response = HttpResponse::BadRequest().json(ErrorResponse::new(
        error_codes::BAD_REQUEST,
        "Malformed request body",
    ));
    actix_web::error::InternalError::from_response(err, response).into()
}

fn internal_error() -> HttpResponse {
    HttpResponse::InternalServerError().json(ErrorResponse::new(
        error_codes::INTERNAL_ERROR,
        "An internal error occurred",
    ))
}
