//! Cache Statistics Module
//!
//! Best-effort introspection of the cache service.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

// == Backend Kind ==
/// Which backend a service is running on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    Redis,
    Memory,
    Disabled,
}

// == Cache Stats ==
/// Snapshot returned by `CacheService::stats`.
///
/// `enabled` is false when no backend is configured or the backend connection
/// is down; the size fields are only filled while a backend is enabled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheStats {
    pub enabled: bool,
    pub backend: BackendKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_count: Option<u64>,
    /// Human-readable memory usage as reported by the backend
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_used: Option<String>,
    pub hits: u64,
    pub misses: u64,
}

impl CacheStats {
    /// Stats for a service that is not actively caching.
    pub fn disabled(backend: BackendKind) -> Self {
        Self {
            enabled: false,
            backend,
            key_count: None,
            memory_used: None,
            hits: 0,
            misses: 0,
        }
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

// == Lookup Counters ==
/// Shared hit/miss counters updated on every lookup.
#[derive(Debug, Default)]
pub struct LookupCounters {
    hits: AtomicU64,
    misses: AtomicU64,
}

impl LookupCounters {
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }
}
