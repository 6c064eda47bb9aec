//! Tests for the token lifecycle components

mod codec_tests;

use std::sync::Arc;

use st_shared::config::JwtConfig;

use crate::repositories::InMemoryTokenRepository;
use crate::services::token::{TokenCodec, TokenServiceConfig, TokenStore, TokenValidator};

pub(super) const TEST_SECRET: &str = "test-secret-for-token-lifecycle";

pub(super) fn codec() -> Arc<TokenCodec> {
    Arc::new(TokenCodec::new(&JwtConfig::new(TEST_SECRET)).unwrap())
}

pub(super) fn store() -> (Arc<InMemoryTokenRepository>, Arc<TokenStore<InMemoryTokenRepository>>) {
    let repo = Arc::new(InMemoryTokenRepository::new());
    let store = Arc::new(TokenStore::new(repo.clone(), TokenServiceConfig::default()));
    (repo, store)
}

pub(super) fn validator() -> (
    Arc<TokenCodec>,
    Arc<TokenStore<InMemoryTokenRepository>>,
    TokenValidator<InMemoryTokenRepository>,
) {
    let codec = codec();
    let (_, store) = store();
    let validator = TokenValidator::new(codec.clone(), store.clone());
    (codec, store, validator)
}
