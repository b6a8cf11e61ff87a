use axum::{
    Router,
    extract::{DefaultBodyLimit, FromRef},
    routing::{get, post},
};
use axum_extra::extract::cookie::Key;
use std::{collections::HashMap, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::Config;
use crate::handlers::{auth, image, spa, spa::AssetDir};
use crate::session::SessionStore;

/// Base64 images blow past axum's 2 MiB default body limit.
const MAX_IMAGE_BODY_BYTES: usize = 32 * 1024 * 1024;

#[derive(Clone)]
pub struct GatewayState {
    pub config: Arc<Config>,
    pub users: Arc<HashMap<String, String>>,
    pub sessions: Arc<dyn SessionStore>,
    pub assets: Arc<AssetDir>,
    pub client: reqwest::Client,
    key: Key,
}

impl GatewayState {
    pub fn new(
        config: Config,
        users: HashMap<String, String>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        let key = config.cookie_key();
        let assets = Arc::new(AssetDir::new(&config.static_dir));
        Self {
            config: Arc::new(config),
            users: Arc::new(users),
            sessions,
            assets,
            client: reqwest::Client::new(),
            key,
        }
    }
}

impl FromRef<GatewayState> for Key {
    fn from_ref(state: &GatewayState) -> Key {
        state.key.clone()
    }
}

pub fn gateway_router(state: GatewayState) -> Router {
    Router::new()
        .route("/api/login", post(auth::login))
        .route("/api/logout", post(auth::logout))
        .route("/api/check-auth", get(auth::check_auth))
        .route(
            "/api/process-image",
            post(image::process_image).layer(DefaultBodyLimit::max(MAX_IMAGE_BODY_BYTES)),
        )
        .fallback(spa::serve_asset)
        .layer(CorsLayer::very_permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
