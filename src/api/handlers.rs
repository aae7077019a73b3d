//! API Handlers
//!
//! HTTP request handlers for the cache admin endpoints.

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use crate::cache::{BackendKind, CacheLookup, CacheService, CacheStats, CacheStatus};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::invalidation::Invalidator;
use crate::models::{
    GetResponse, HealthResponse, InvalidateRequest, InvalidateResponse, SetRequest, SetResponse,
};

/// Application state shared across all handlers.
///
/// The service is cheap to clone; clones share the same backend.
#[derive(Clone)]
pub struct AppState {
    pub cache: CacheService,
    pub invalidator: Invalidator,
}

impl AppState {
    /// Creates a new AppState around the given cache service.
    pub fn new(cache: CacheService) -> Self {
        Self {
            invalidator: Invalidator::new(cache.clone()),
            cache,
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Connects to the configured backend, or falls back to memory.
    pub async fn from_config(config: &Config) -> Self {
        Self::new(CacheService::connect(config).await)
    }
}

/// Handler for PUT /cache/entries
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let ttl = req.effective_ttl();
    state.cache.set(&req.key, &req.value, ttl).await;

    Ok(Json(SetResponse::new(req.key, ttl)))
}

/// Handler for GET /cache/entries/:key
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    match state.cache.lookup::<Value>(&key).await {
        CacheLookup::Hit(value) => Ok(Json(GetResponse::new(key, value))),
        CacheLookup::Miss => Err(CacheError::NotFound(key)),
        CacheLookup::Unavailable => Err(CacheError::Unavailable),
    }
}

/// Handler for POST /cache/invalidate
pub async fn invalidate_handler(
    State(state): State<AppState>,
    Json(req): Json<InvalidateRequest>,
) -> Result<Json<InvalidateResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    if let Some(pattern) = &req.pattern {
        state.cache.invalidate(pattern).await;
    }
    if !req.tags.is_empty() {
        state.invalidator.batch(&req.tags).await;
    }

    Ok(Json(InvalidateResponse::new(req.pattern, req.tags)))
}

/// Handler for DELETE /cache
pub async fn clear_handler(State(state): State<AppState>) -> Json<InvalidateResponse> {
    state.cache.clear().await;
    Json(InvalidateResponse::cleared())
}

/// Handler for GET /cache/stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<CacheStats> {
    Json(state.cache.stats().await)
}

/// Handler for GET /health
///
/// The process is healthy even when the cache is degraded.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let cache = match (state.cache.status(), state.cache.backend_kind()) {
        (CacheStatus::Enabled, _) => "enabled",
        (CacheStatus::Connecting, _) => "connecting",
        (CacheStatus::Disabled, BackendKind::Memory) => "memory",
        (CacheStatus::Disabled, _) => "disabled",
    };
    Json(HealthResponse::healthy(cache))
}
