//! Backend selection and HTTP server startup

use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use async_trait::async_trait;
use tracing::{info, warn};

use st_core::domain::SessionEvent;
use st_core::errors::DomainError;
use st_core::repositories::{InMemoryTokenRepository, InMemoryUserDirectory, TokenRepository, UserDirectory};
use st_core::services::{
    EventSink, SessionService, SessionServiceConfig, TokenCleanupService, TokenCodec,
    TokenServiceConfig, TokenStore, TracingEventSink,
};
use st_infra::{DatabasePool, MySqlTokenRepository, MySqlUserDirectory, RedisEventSink};
use st_shared::config::{AppConfig, CacheConfig};

use crate::app::create_app_with_limit;
use crate::routes::auth::AppState;

/// Event sink chosen at startup
pub enum SessionEventSink {
    Redis(RedisEventSink),
    Tracing(TracingEventSink),
}

impl SessionEventSink {
    /// Redis when configured and reachable, otherwise the tracing sink
    pub async fn connect(config: Option<&CacheConfig>) -> Self {
        let Some(config) = config else {
            info!("No Redis configured; session events are only logged");
            return SessionEventSink::Tracing(TracingEventSink);
        };

        match RedisEventSink::new(config).await {
            Ok(sink) => {
                info!(channel = sink.channel(), "Publishing session events to Redis");
                SessionEventSink::Redis(sink)
            }
            Err(e) => {
                warn!(error = %e, "Redis unavailable; session events are only logged");
                SessionEventSink::Tracing(TracingEventSink)
            }
        }
    }
}

#[async_trait]
impl EventSink for SessionEventSink {
    async fn publish(&self, event: &SessionEvent) -> Result<(), DomainError> {
        match self {
            SessionEventSink::Redis(sink) => sink.publish(event).await,
            SessionEventSink::Tracing(sink) => sink.publish(event).await,
        }
    }
}

/// Build every backend from `config` and serve until shutdown
///
/// An unusable signing configuration aborts before anything binds.
pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    let codec = Arc::new(
        TokenCodec::new(&config.auth.jwt).context("Invalid token signing configuration")?,
    );
    let events = Arc::new(SessionEventSink::connect(config.cache.as_ref()).await);

    match &config.database {
        Some(database) => {
            let pool = DatabasePool::new(database)
                .await
                .context("Failed to connect to the database")?;
            pool.run_migrations()
                .await
                .context("Failed to run database migrations")?;

            let users = Arc::new(MySqlUserDirectory::new(pool.get_pool().clone()));
            let tokens = Arc::new(MySqlTokenRepository::new(pool.get_pool().clone()));
            let result = serve(&config, codec, users, tokens, events).await;

            pool.close().await;
            result
        }
        None => {
            warn!("No database configured; accounts and tokens are kept in memory");
            let users = Arc::new(InMemoryUserDirectory::new());
            let tokens = Arc::new(InMemoryTokenRepository::new());
            serve(&config, codec, users, tokens, events).await
        }
    }
}

/// Wire the session service over the given backends and run the HTTP server
pub async fn serve<U, R, E>(
    config: &AppConfig,
    codec: Arc<TokenCodec>,
    users: Arc<U>,
    tokens: Arc<R>,
    events: Arc<E>,
) -> anyhow::Result<()>
where
    U: UserDirectory + 'static,
    R: TokenRepository + 'static,
    E: EventSink + 'static,
{
    let token_config = TokenServiceConfig::from_jwt_config(&config.auth.jwt)
        .context("Invalid token lifetime configuration")?;
    let store = Arc::new(TokenStore::new(tokens, token_config));

    let cleanup = Arc::new(TokenCleanupService::new(
        Arc::clone(&store),
        config.auth.cleanup.clone(),
    ));
    let cleanup_handle = cleanup.start_background_task();

    let session_service = Arc::new(SessionService::new(
        users,
        codec,
        store,
        events,
        SessionServiceConfig::default(),
    ));
    let app_state = web::Data::new(AppState::new(session_service));

    let json_limit = config.server.max_payload_size;
    let bind_address = config.server.bind_address();
    info!(%bind_address, "Starting HTTP server");

    let mut server = HttpServer::new(move || create_app_with_limit(app_state.clone(), json_limit));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    let result = server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await;

    if let Some(handle) = cleanup_handle {
        handle.abort();
    }

    result.context("HTTP server stopped with an error")
}
