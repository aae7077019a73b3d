//! API Module
//!
//! Admin HTTP surface over the cache service. Application code uses the
//! service directly; these routes exist for operators.
//!
//! # Endpoints
//! - `GET /health` - Health check endpoint
//! - `GET /cache/stats` - Cache statistics
//! - `GET /cache/entries/:key` - Read a value
//! - `PUT /cache/entries` - Store a value
//! - `POST /cache/invalidate` - Invalidate by key, pattern or tag
//! - `DELETE /cache` - Full flush

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
