//! Integration tests for the refresh endpoint

mod common;

use actix_web::test;
use common::{
    login_request, logout_request, refresh_request, validate_request, TestContext, ALICE_EMAIL,
    ALICE_PASSWORD,
};
use st_api::app::create_app;

#[actix_web::test]
async fn test_refresh_returns_new_access_token_and_same_refresh_token() {
    let ctx = TestContext::new().await;
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let login: serde_json::Value =
        test::call_and_read_body_json(&app, login_request(ALICE_EMAIL, ALICE_PASSWORD).to_request())
            .await;
    let refresh_token = login["refreshToken"].as_str().unwrap();

    let resp = test::call_service(&app, refresh_request(refresh_token).to_request()).await;
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["refreshToken"], refresh_token);
    assert_ne!(body["accessToken"], login["accessToken"]);

    let details: serde_json::Value = test::call_and_read_body_json(
        &app,
        validate_request(body["accessToken"].as_str().unwrap()).to_request(),
    )
    .await;
    assert_eq!(details["valid"], true);
    assert_eq!(details["email"], ALICE_EMAIL);
}

#[actix_web::test]
async fn test_refresh_rejects_access_token() {
    let ctx = TestContext::new().await;
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let login: serde_json::Value =
        test::call_and_read_body_json(&app, login_request(ALICE_EMAIL, ALICE_PASSWORD).to_request())
            .await;
    let access = login["accessToken"].as_str().unwrap();

    let resp = test::call_service(&app, refresh_request(access).to_request()).await;
    assert_eq!(resp.status(), 401);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "TOKEN_TYPE_MISMATCH");
}

#[actix_web::test]
async fn test_refresh_after_logout_fails() {
    let ctx = TestContext::new().await;
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let login: serde_json::Value =
        test::call_and_read_body_json(&app, login_request(ALICE_EMAIL, ALICE_PASSWORD).to_request())
            .await;
    let resp = test::call_service(
        &app,
        logout_request(login["accessToken"].as_str().unwrap()).to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);

    let resp = test::call_service(
        &app,
        refresh_request(login["refreshToken"].as_str().unwrap()).to_request(),
    )
    .await;
    assert_eq!(resp.status(), 401);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "INVALID_OR_EXPIRED_TOKEN");
}

#[actix_web::test]
async fn test_refresh_with_garbage_token() {
    let ctx = TestContext::new().await;
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let resp = test::call_service(&app, refresh_request("garbage").to_request()).await;
    assert_eq!(resp.status(), 401);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "INVALID_OR_EXPIRED_TOKEN");
}

#[actix_web::test]
async fn test_refresh_requires_token_field() {
    let ctx = TestContext::new().await;
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let resp = test::call_service(&app, refresh_request("").to_request()).await;
    assert_eq!(resp.status(), 400);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
}
