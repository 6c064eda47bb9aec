//! Unit tests for TokenCodec

use chrono::{Duration, Utc};
use serde_json::json;
use st_shared::config::JwtConfig;

use crate::domain::entities::token::TokenKind;
use crate::errors::{DecodeError, DomainError};
use crate::services::token::TokenCodec;

use super::{codec, TEST_SECRET};

fn roles() -> Vec<String> {
    vec!["USER".to_string(), "ADMIN".to_string()]
}

fn raw_payload(user_id: serde_json::Value) -> serde_json::Value {
    let now = Utc::now().timestamp();
    json!({
        "sub": "rider@transit.test",
        "userId": user_id,
        "roles": ["USER"],
        "tokenType": "ACCESS",
        "iat": now,
        "exp": now + 600,
        "iss": "smart-transit",
        "jti": "c3a2f7a4-51a2-4b7c-9a51-0d9c7c7a1e11"
    })
}

#[test]
fn test_encode_then_decode_recovers_claims() {
    let codec = codec();
    let token = codec
        .encode(TokenKind::Access, "rider@transit.test", 42, &roles(), Duration::seconds(900))
        .unwrap();

    let claims = codec.decode(&token).unwrap();
    assert_eq!(claims.sub, "rider@transit.test");
    assert_eq!(claims.user_id, 42);
    assert_eq!(claims.roles, roles());
    assert_eq!(claims.kind, TokenKind::Access);
    assert_eq!(claims.iss, "smart-transit");
    assert_eq!(claims.exp - claims.iat, 900);
}

#[test]
fn test_tokens_minted_together_differ() {
    let codec = codec();
    let a = codec
        .encode(TokenKind::Access, "a@x.com", 1, &[], Duration::seconds(900))
        .unwrap();
    let b = codec
        .encode(TokenKind::Access, "a@x.com", 1, &[], Duration::seconds(900))
        .unwrap();
    assert_ne!(a, b);
}

#[test]
fn test_expired_token_is_reported_as_expired() {
    let codec = codec();
    let past = codec
        .encode(TokenKind::Access, "a@x.com", 1, &[], Duration::seconds(-30))
        .unwrap();
    assert_eq!(codec.decode(&past), Err(DecodeError::Expired));

    // exp == now counts as expired
    let boundary = codec
        .encode(TokenKind::Access, "a@x.com", 1, &[], Duration::zero())
        .unwrap();
    assert_eq!(codec.decode(&boundary), Err(DecodeError::Expired));
}

#[test]
fn test_tampered_token_is_malformed() {
    let codec = codec();
    let token = codec
        .encode(TokenKind::Access, "a@x.com", 1, &[], Duration::seconds(900))
        .unwrap();

    let mut parts: Vec<String> = token.split('.').map(String::from).collect();
    let forged_payload = codec.sign(&raw_payload(json!(999))).unwrap();
    parts[1] = forged_payload.split('.').nth(1).unwrap().to_string();
    let tampered = parts.join(".");

    assert_eq!(codec.decode(&tampered), Err(DecodeError::Malformed));
}

#[test]
fn test_garbage_is_malformed() {
    let codec = codec();
    for input in ["", "not-a-token", "a.b.c", "eyJhbGciOiJIUzUxMiJ9.e30."] {
        assert_eq!(codec.decode(input), Err(DecodeError::Malformed), "input {:?}", input);
    }
}

#[test]
fn test_token_from_other_secret_is_malformed() {
    let ours = codec();
    let theirs = TokenCodec::new(&JwtConfig::new("another-secret")).unwrap();
    let token = theirs
        .encode(TokenKind::Access, "a@x.com", 1, &[], Duration::seconds(900))
        .unwrap();

    assert_eq!(ours.decode(&token), Err(DecodeError::Malformed));
}

#[test]
fn test_wrong_issuer_is_malformed() {
    let ours = codec();
    let mut config = JwtConfig::new(TEST_SECRET);
    config.issuer = "someone-else".to_string();
    let theirs = TokenCodec::new(&config).unwrap();
    let token = theirs
        .encode(TokenKind::Access, "a@x.com", 1, &[], Duration::seconds(900))
        .unwrap();

    assert_eq!(ours.decode(&token), Err(DecodeError::Malformed));
}

#[test]
fn test_numeric_string_user_id_is_coerced() {
    let codec = codec();
    let token = codec.sign(&raw_payload(json!("77"))).unwrap();
    assert_eq!(codec.decode(&token).unwrap().user_id, 77);
}

#[test]
fn test_unusable_user_id_is_malformed() {
    let codec = codec();
    for bad in [json!(1.5), json!(true), json!("seven"), json!(null)] {
        let token = codec.sign(&raw_payload(bad.clone())).unwrap();
        assert_eq!(codec.decode(&token), Err(DecodeError::Malformed), "userId {}", bad);
    }

    let mut missing = raw_payload(json!(1));
    missing.as_object_mut().unwrap().remove("userId");
    let token = codec.sign(&missing).unwrap();
    assert_eq!(codec.decode(&token), Err(DecodeError::Malformed));
}

#[test]
fn test_short_secret_is_padded_with_zeros() {
    let short = TokenCodec::new(&JwtConfig::new("short")).unwrap();
    let padded = TokenCodec::new(&JwtConfig::new(format!("short{}", "0".repeat(59)))).unwrap();

    let token = short
        .encode(TokenKind::Refresh, "a@x.com", 5, &[], Duration::seconds(60))
        .unwrap();
    assert_eq!(padded.decode(&token).unwrap().user_id, 5);
}

#[test]
fn test_empty_secret_is_config_error() {
    let result = TokenCodec::new(&JwtConfig::new(""));
    assert!(matches!(result, Err(DomainError::Config { .. })));
}

#[test]
fn test_non_hmac_algorithm_is_config_error() {
    let mut config = JwtConfig::new(TEST_SECRET);
    config.algorithm = "RS256".to_string();
    assert!(matches!(TokenCodec::new(&config), Err(DomainError::Config { .. })));

    config.algorithm = "NOPE".to_string();
    assert!(matches!(TokenCodec::new(&config), Err(DomainError::Config { .. })));
}

#[test]
fn test_hs256_is_supported() {
    let mut config = JwtConfig::new(TEST_SECRET);
    config.algorithm = "HS256".to_string();
    let codec = TokenCodec::new(&config).unwrap();

    let token = codec
        .encode(TokenKind::Access, "a@x.com", 3, &[], Duration::seconds(60))
        .unwrap();
    assert_eq!(codec.decode(&token).unwrap().user_id, 3);
}

#[test]
fn test_unusable_token_lifetime_is_config_error() {
    let huge = JwtConfig::new(TEST_SECRET).with_refresh_expiry_seconds(10_000_000_000_000);
    assert!(matches!(TokenCodec::new(&huge), Err(DomainError::Config { .. })));

    let out_of_range = JwtConfig::new(TEST_SECRET).with_access_expiry_seconds(i64::MAX);
    assert!(matches!(TokenCodec::new(&out_of_range), Err(DomainError::Config { .. })));

    let negative = JwtConfig::new(TEST_SECRET).with_access_expiry_seconds(-900);
    assert!(matches!(TokenCodec::new(&negative), Err(DomainError::Config { .. })));

    let zero = JwtConfig::new(TEST_SECRET).with_refresh_expiry_seconds(0);
    assert!(matches!(TokenCodec::new(&zero), Err(DomainError::Config { .. })));
}

#[test]
fn test_encode_with_overflowing_lifetime_fails_cleanly() {
    let codec = codec();
    let result = codec.encode(
        TokenKind::Refresh,
        "a@x.com",
        1,
        &[],
        Duration::seconds(10_000_000_000_000),
    );
    assert!(matches!(result, Err(DomainError::Config { .. })));
}
