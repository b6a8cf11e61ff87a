use mimalloc::MiMalloc;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use snapforge::config::Config;
use snapforge::router::{GatewayState, gateway_router};
use snapforge::service::user_loader;
use snapforge::session::MemorySessionStore;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = Config::from_env()?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    if cfg.cookie_secret.is_empty() {
        warn!("SNAPFORGE_COOKIE_SECRET is empty; session cookies are forgeable");
    }
    if cfg.gemini_api_key.is_empty() {
        warn!("SNAPFORGE_GEMINI_API_KEY is empty; image requests will be rejected upstream");
    }

    let mut users = cfg.users.clone();
    if let Some(path) = cfg.users_path.as_ref() {
        users.extend(user_loader::load_from_file(path)?);
    }
    if users.is_empty() {
        warn!("credential table is empty; every login will fail");
    }

    info!(
        listen = %cfg.listen,
        static_dir = %cfg.static_dir.display(),
        users = users.len(),
        upstream = %cfg.gemini_api_url,
        loglevel = %cfg.loglevel
    );

    let listen = cfg.listen;
    let state = GatewayState::new(cfg, users, Arc::new(MemorySessionStore::new()));
    let app = gateway_router(state);

    let listener = TcpListener::bind(listen).await?;
    info!("HTTP server listening on {}", listen);
    axum::serve(listener, app).await?;
    Ok(())
}
