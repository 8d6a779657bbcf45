use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::AppState;

pub mod handlers;

/// Build the public API router. All routes are relative — the caller mounts
/// this at the server root.
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/track", post(handlers::track))
        .route("/track/batch", post(handlers::track_batch))
        .route("/carriers", get(handlers::list_carriers))
        .route("/health", get(handlers::health))
}
