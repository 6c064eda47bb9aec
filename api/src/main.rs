use tracing::{info, warn};

use st_shared::config::{AppConfig, Environment};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Process env wins, then `.env`, then the per-environment file
    dotenvy::dotenv().ok();
    dotenvy::from_filename(Environment::from_env().env_file()).ok();

    let config = AppConfig::from_env();
    st_api::telemetry::init_tracing(&config.logging)?;

    info!(
        environment = %config.environment,
        version = env!("CARGO_PKG_VERSION"),
        "Starting SmartTransit auth service"
    );
    for warning in config.startup_warnings() {
        warn!("{}", warning);
    }

    st_api::server::run(config).await
}
