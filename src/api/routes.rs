//! API Routes
//!
//! Configures the Axum router for the cache admin endpoints.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    clear_handler, get_handler, health_handler, invalidate_handler, set_handler, stats_handler,
    AppState,
};

/// Creates the admin router.
///
/// # Endpoints
/// - `GET /health` - Health check with cache state
/// - `GET /cache/stats` - Cache statistics
/// - `GET /cache/entries/:key` - Read a cached JSON value
/// - `PUT /cache/entries` - Store a JSON value
/// - `POST /cache/invalidate` - Invalidate a key, pattern or tags
/// - `DELETE /cache` - Flush everything
///
/// The host application may serve this directly or `nest` it under its own
/// admin prefix.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/cache", delete(clear_handler))
        .route("/cache/stats", get(stats_handler))
        .route("/cache/entries", put(set_handler))
        .route("/cache/entries/:key", get(get_handler))
        .route("/cache/invalidate", post(invalidate_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
