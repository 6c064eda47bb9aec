//! Shared setup for the HTTP integration tests

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::{test, web};
use serde_json::json;

use st_api::routes::auth::AppState;
use st_core::domain::SessionEvent;
use st_core::repositories::{InMemoryTokenRepository, InMemoryUserDirectory};
use st_core::services::{
    InMemoryEventSink, SessionService, SessionServiceConfig, TokenCodec, TokenServiceConfig,
    TokenStore,
};
use st_shared::config::JwtConfig;

pub const ALICE_ID: i64 = 1;
pub const ALICE_EMAIL: &str = "a@x.com";
pub const ALICE_PASSWORD: &str = "secret";

pub type TestState = AppState<InMemoryUserDirectory, InMemoryTokenRepository, InMemoryEventSink>;

/// In-memory backends plus handles to inspect them
pub struct TestContext {
    pub state: web::Data<TestState>,
    pub users: Arc<InMemoryUserDirectory>,
    pub tokens: Arc<InMemoryTokenRepository>,
    pub events: Arc<InMemoryEventSink>,
}

impl TestContext {
    /// Context with a single active account, Alice
    pub async fn new() -> Self {
        let users = Arc::new(InMemoryUserDirectory::with_cost(4));
        users
            .add_user(ALICE_ID, ALICE_EMAIL, ALICE_PASSWORD, vec!["USER".to_string()])
            .await
            .expect("seed user");

        let tokens = Arc::new(InMemoryTokenRepository::new());
        let events = Arc::new(InMemoryEventSink::new());

        let jwt = JwtConfig::new("integration-test-secret");
        let codec = Arc::new(TokenCodec::new(&jwt).expect("valid signing config"));
        let store = Arc::new(TokenStore::new(
            Arc::clone(&tokens),
            TokenServiceConfig::from_jwt_config(&jwt).expect("valid token lifetimes"),
        ));

        let service = SessionService::new(
            Arc::clone(&users),
            codec,
            store,
            Arc::clone(&events),
            SessionServiceConfig::default(),
        );

        Self {
            state: web::Data::new(AppState::new(Arc::new(service))),
            users,
            tokens,
            events,
        }
    }

    /// Events the sink has received once background deliveries have run
    pub async fn published_events(&self) -> Vec<SessionEvent> {
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
        self.events.events().await
    }

    /// Reset token carried by the most recent reset event
    pub async fn last_reset_token(&self) -> Option<String> {
        self.published_events()
            .await
            .into_iter()
            .rev()
            .find_map(|event| match event {
                SessionEvent::PasswordResetRequested { token, .. } => Some(token),
                _ => None,
            })
    }
}

pub fn login_request(email: &str, password: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "email": email, "password": password }))
}

pub fn validate_request(token: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/v1/auth/validate")
        .set_json(json!({ "token": token }))
}

pub fn refresh_request(refresh_token: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .set_json(json!({ "refreshToken": refresh_token }))
}

pub fn logout_request(token: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/v1/auth/logout")
        .insert_header(("Authorization", format!("Bearer {}", token)))
}
