//! Application factory
//!
//! Builds the Actix-web application around a shared [`AppState`].

use actix_web::{web, App, HttpResponse};
use tracing_actix_web::TracingLogger;

use crate::handlers::json_error_handler;
use crate::routes::auth::{
    login::login,
    logout::logout,
    password::{request_reset, reset_password, verify_reset},
    refresh::refresh,
    validate::validate,
    AppState,
};

use st_core::repositories::{TokenRepository, UserDirectory};
use st_core::services::EventSink;
use st_shared::errors::{error_codes, ErrorResponse};
use st_shared::types::HealthResponse;

/// Default JSON body limit when none is configured (64 KB)
pub const DEFAULT_JSON_LIMIT: usize = 64 * 1024;

/// Create the application with the default body limit
pub fn create_app<U, R, E>(
    app_state: web::Data<AppState<U, R, E>>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserDirectory + 'static,
    R: TokenRepository + 'static,
    E: EventSink + 'static,
{
    create_app_with_limit(app_state, DEFAULT_JSON_LIMIT)
}

/// Create the application, capping JSON bodies at `json_limit` bytes
pub fn create_app_with_limit<U, R, E>(
    app_state: web::Data<AppState<U, R, E>>,
    json_limit: usize,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserDirectory + 'static,
    R: TokenRepository + 'static,
    E: EventSink + 'static,
{
    let json_config = web::JsonConfig::default()
        .limit(json_limit)
        .error_handler(json_error_handler);

    App::new()
        .app_data(app_state)
        .app_data(json_config)
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1/auth")
                .route("/login", web::post().to(login::<U, R, E>))
                .route("/logout", web::post().to(logout::<U, R, E>))
                .route("/refresh", web::post().to(refresh::<U, R, E>))
                .route("/validate", web::post().to(validate::<U, R, E>))
                .route(
                    "/password/reset-request",
                    web::post().to(request_reset::<U, R, E>),
                )
                .route(
                    "/password/reset/verify",
                    web::get().to(verify_reset::<U, R, E>),
                )
                .route("/password/reset", web::post().to(reset_password::<U, R, E>)),
        )
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse::healthy(
        "smart-transit-auth",
        env!("CARGO_PKG_VERSION"),
    ))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
