//! Error types for the cache layer
//!
//! Provides unified error handling using thiserror. The cache service never
//! returns these to application code; they are logged and folded into a miss
//! or a no-op. Only the admin API turns them into HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache layer.
#[derive(Error, Debug)]
pub enum CacheError {
    /// No backend URL was configured
    #[error("Cache backend not configured")]
    NotConfigured,

    /// Handshake with the backend failed or timed out
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Error reported by the Redis driver
    #[error("Backend error: {0}")]
    Backend(#[from] redis::RedisError),

    /// Value could not be serialized or deserialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Key pattern could not be compiled
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    /// Caching is disabled or the backend connection is down
    #[error("Cache unavailable")]
    Unavailable,

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Key not found in cache
    #[error("Key not found: {0}")]
    NotFound(String),
}

impl CacheError {
    /// Returns true when the error means the backend connection is gone.
    pub fn is_connection_loss(&self) -> bool {
        match self {
            CacheError::Connection(_) => true,
            CacheError::Backend(e) => {
                e.is_io_error() || e.is_connection_refusal() || e.is_connection_dropped() || e.is_timeout()
            }
            _ => false,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::InvalidRequest(_) | CacheError::InvalidPattern(_) => StatusCode::BAD_REQUEST,
            CacheError::NotConfigured | CacheError::Unavailable | CacheError::Connection(_) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            CacheError::Backend(_) | CacheError::Serialization(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache layer.
pub type Result<T> = std::result::Result<T, CacheError>;
