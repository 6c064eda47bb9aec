//! Integration tests for the login endpoint

mod common;

use actix_web::test;
use common::{login_request, TestContext, ALICE_EMAIL, ALICE_ID, ALICE_PASSWORD};
use st_api::app::create_app;
use st_core::domain::SessionEvent;

#[actix_web::test]
async fn test_login_success() {
    let ctx = TestContext::new().await;
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = login_request(ALICE_EMAIL, ALICE_PASSWORD).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["userId"], ALICE_ID);
    assert_eq!(body["email"], ALICE_EMAIL);
    assert_eq!(body["roles"], serde_json::json!(["USER"]));

    let access = body["accessToken"].as_str().unwrap();
    let refresh = body["refreshToken"].as_str().unwrap();
    assert!(!access.is_empty());
    assert_ne!(access, refresh);

    // Both tokens are stored before they are handed out
    assert_eq!(ctx.tokens.len().await, 2);
}

#[actix_web::test]
async fn test_login_publishes_event() {
    let ctx = TestContext::new().await;
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = login_request(ALICE_EMAIL, ALICE_PASSWORD).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let events = ctx.published_events().await;
    assert_eq!(events.len(), 1);
    assert!(matches!(
        &events[0],
        SessionEvent::LoginSucceeded { user_id, .. } if *user_id == ALICE_ID
    ));
}

#[actix_web::test]
async fn test_two_logins_issue_distinct_tokens() {
    let ctx = TestContext::new().await;
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let first: serde_json::Value =
        test::call_and_read_body_json(&app, login_request(ALICE_EMAIL, ALICE_PASSWORD).to_request())
            .await;
    let second: serde_json::Value =
        test::call_and_read_body_json(&app, login_request(ALICE_EMAIL, ALICE_PASSWORD).to_request())
            .await;

    assert_ne!(first["accessToken"], second["accessToken"]);
    assert_ne!(first["refreshToken"], second["refreshToken"]);
}

#[actix_web::test]
async fn test_wrong_password_and_unknown_email_look_the_same() {
    let ctx = TestContext::new().await;
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let wrong_password = test::call_service(&app, login_request(ALICE_EMAIL, "nope").to_request()).await;
    assert_eq!(wrong_password.status(), 401);
    let wrong_password: serde_json::Value = test::read_body_json(wrong_password).await;

    let unknown = test::call_service(&app, login_request("b@x.com", ALICE_PASSWORD).to_request()).await;
    assert_eq!(unknown.status(), 401);
    let unknown: serde_json::Value = test::read_body_json(unknown).await;

    assert_eq!(wrong_password["error"], "INVALID_CREDENTIALS");
    assert_eq!(wrong_password["error"], unknown["error"]);
    assert_eq!(wrong_password["message"], unknown["message"]);
    assert!(ctx.tokens.is_empty().await);
}

#[actix_web::test]
async fn test_inactive_account_cannot_log_in() {
    let ctx = TestContext::new().await;
    ctx.users.deactivate(ALICE_ID).await.unwrap();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let resp = test::call_service(&app, login_request(ALICE_EMAIL, ALICE_PASSWORD).to_request()).await;
    assert_eq!(resp.status(), 401);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "INVALID_CREDENTIALS");
}

#[actix_web::test]
async fn test_login_validation_error() {
    let ctx = TestContext::new().await;
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let resp = test::call_service(&app, login_request("not-an-email", "").to_request()).await;
    assert_eq!(resp.status(), 400);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert!(body["details"]["email"].is_array());
    assert!(body["details"]["password"].is_array());
}

#[actix_web::test]
async fn test_malformed_body() {
    let ctx = TestContext::new().await;
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{\"email\":")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "BAD_REQUEST");
}
