pub mod files;
pub mod health;
pub mod home;
pub mod upload;

pub use files::*;
pub use health::*;
pub use home::*;
pub use upload::*;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use crate::config::Config;
use crate::middleware::logging_middleware;
use crate::services::Storage;

/// State handed to every handler; the storage root is injected here rather
/// than read from a global.
#[derive(Debug, Clone)]
pub struct AppState {
    pub storage: Storage,
    pub max_file_size_mb: usize,
}

impl AppState {
    pub fn new(storage: Storage, config: &Config) -> Self {
        Self {
            storage,
            max_file_size_mb: config.max_file_size_mb,
        }
    }
}

pub fn create_router(config: &Config, state: AppState) -> Router {
    // CORS covers /api only.
    let cors = CorsLayer::permissive().max_age(Duration::from_secs(config.cors_max_age_seconds));

    let api = Router::new()
        .route("/upload", post(upload_handler))
        .route("/files/:name", get(download_handler))
        .layer(cors);

    Router::new()
        .route("/", get(landing_handler))
        .route("/ping", get(ping_handler))
        .nest("/api", api)
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(logging_middleware))
                .layer(DefaultBodyLimit::max(config.max_file_size_bytes())),
        )
        .with_state(state)
}
