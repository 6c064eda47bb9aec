//! Integration tests for the password reset endpoints

mod common;

use actix_web::test;
use common::{login_request, validate_request, TestContext, ALICE_EMAIL, ALICE_PASSWORD};
use serde_json::json;
use st_api::app::create_app;

const NEW_PASSWORD: &str = "n3w-secret";

fn reset_request(email: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/v1/auth/password/reset-request")
        .set_json(json!({ "email": email }))
}

fn confirm_request(token: &str, new_password: &str, confirm_password: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/v1/auth/password/reset")
        .set_json(json!({
            "token": token,
            "newPassword": new_password,
            "confirmPassword": confirm_password,
        }))
}

fn verify_request(token: &str) -> test::TestRequest {
    test::TestRequest::get().uri(&format!("/api/v1/auth/password/reset/verify?token={}", token))
}

#[actix_web::test]
async fn test_reset_request_answer_does_not_reveal_accounts() {
    let ctx = TestContext::new().await;
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let known: serde_json::Value =
        test::call_and_read_body_json(&app, reset_request(ALICE_EMAIL).to_request()).await;
    let unknown: serde_json::Value =
        test::call_and_read_body_json(&app, reset_request("nobody@x.com").to_request()).await;

    assert_eq!(known, unknown);
    assert_eq!(known["success"], true);
    assert_eq!(known["message"], "If the email exists, a reset link was sent");

    // Only the real account produced a reset event
    assert_eq!(ctx.published_events().await.len(), 1);
}

#[actix_web::test]
async fn test_verify_reset_token() {
    let ctx = TestContext::new().await;
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let resp = test::call_service(&app, reset_request(ALICE_EMAIL).to_request()).await;
    assert_eq!(resp.status(), 200);
    let token = ctx.last_reset_token().await.expect("reset event");

    let body: serde_json::Value =
        test::call_and_read_body_json(&app, verify_request(&token).to_request()).await;
    assert_eq!(body["valid"], true);
    assert!(body["expiresAt"].is_string());

    let body: serde_json::Value =
        test::call_and_read_body_json(&app, verify_request("garbage").to_request()).await;
    assert_eq!(body, json!({ "valid": false }));
}

#[actix_web::test]
async fn test_verify_without_token_is_invalid() {
    let ctx = TestContext::new().await;
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/password/reset/verify")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["valid"], false);
}

#[actix_web::test]
async fn test_mismatched_confirmation_is_reported_in_body() {
    let ctx = TestContext::new().await;
    let app = test::init_service(create_app(ctx.state.clone())).await;

    test::call_service(&app, reset_request(ALICE_EMAIL).to_request()).await;
    let token = ctx.last_reset_token().await.expect("reset event");

    let resp = test::call_service(
        &app,
        confirm_request(&token, NEW_PASSWORD, "something-else").to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Passwords do not match");

    // The password is unchanged
    let resp = test::call_service(&app, login_request(ALICE_EMAIL, ALICE_PASSWORD).to_request()).await;
    assert_eq!(resp.status(), 200);
}

#[actix_web::test]
async fn test_full_reset_flow() {
    let ctx = TestContext::new().await;
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let login: serde_json::Value =
        test::call_and_read_body_json(&app, login_request(ALICE_EMAIL, ALICE_PASSWORD).to_request())
            .await;

    test::call_service(&app, reset_request(ALICE_EMAIL).to_request()).await;
    let token = ctx.last_reset_token().await.expect("reset event");

    let body: serde_json::Value = test::call_and_read_body_json(
        &app,
        confirm_request(&token, NEW_PASSWORD, NEW_PASSWORD).to_request(),
    )
    .await;
    assert_eq!(body["success"], true);

    // Old password no longer works, new one does
    let resp = test::call_service(&app, login_request(ALICE_EMAIL, ALICE_PASSWORD).to_request()).await;
    assert_eq!(resp.status(), 401);
    let resp = test::call_service(&app, login_request(ALICE_EMAIL, NEW_PASSWORD).to_request()).await;
    assert_eq!(resp.status(), 200);

    // Sessions from before the reset are gone
    let details: serde_json::Value = test::call_and_read_body_json(
        &app,
        validate_request(login["accessToken"].as_str().unwrap()).to_request(),
    )
    .await;
    assert_eq!(details["valid"], false);

    // The reset token cannot be used twice
    let body: serde_json::Value = test::call_and_read_body_json(
        &app,
        confirm_request(&token, "another-one", "another-one").to_request(),
    )
    .await;
    assert_eq!(body["success"], false);

    let body: serde_json::Value =
        test::call_and_read_body_json(&app, verify_request(&token).to_request()).await;
    assert_eq!(body["valid"], false);
}

#[actix_web::test]
async fn test_reset_with_invalid_token() {
    let ctx = TestContext::new().await;
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let resp = test::call_service(
        &app,
        confirm_request("garbage", NEW_PASSWORD, NEW_PASSWORD).to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Invalid or expired reset token");
}
