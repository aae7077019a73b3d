//! Realty Cache - caching layer for the real-estate management backend
//!
//! A get/set/invalidate facade over Redis with an in-memory fallback, a key
//! and TTL registry, and resource-specific invalidation helpers.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod invalidation;
pub mod keys;
pub mod models;

pub use api::AppState;
pub use cache::{CacheLookup, CacheService, CacheStats, CacheStatus};
pub use config::Config;
pub use invalidation::{Invalidator, ResourceTag};
pub use keys::TtlTier;
