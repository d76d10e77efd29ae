pub mod health;

use std::path::Path;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::services::{ServeDir, ServeFile};

use crate::roadmap::handlers;
use crate::state::AppState;

/// Landing document served at `/`, relative to the static root.
pub const INDEX_FILE: &str = "index.html";

pub fn build_router(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/generate-learning-path",
            post(handlers::handle_generate_learning_path),
        )
        .route_service("/", ServeFile::new(static_dir.join(INDEX_FILE)))
        .fallback_service(ServeDir::new(static_dir))
        .with_state(state)
}
