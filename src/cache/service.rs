//! Cache Service Module
//!
//! The client adapter consumed by route handlers. It exposes one surface over
//! Redis, the in-memory fallback or nothing at all, and never lets a cache
//! failure reach the caller.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::cache::pattern::is_wildcard;
use crate::cache::{
    BackendKind, CacheStats, Clock, KeyPattern, LookupCounters, MemoryStore, RedisBackend,
    SystemClock,
};
use crate::config::Config;
use crate::error::{CacheError, Result};

// == Cache Status ==
/// Connection state of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Disabled,
    Connecting,
    Enabled,
}

impl CacheStatus {
    fn as_u8(self) -> u8 {
        match self {
            CacheStatus::Disabled => 0,
            CacheStatus::Connecting => 1,
            CacheStatus::Enabled => 2,
        }
    }

    fn from_u8(value: u8) -> Self {
        match value {
            1 => CacheStatus::Connecting,
            2 => CacheStatus::Enabled,
            _ => CacheStatus::Disabled,
        }
    }
}

// == Cache Lookup ==
/// Outcome of a lookup.
///
/// `Miss` means the key is definitely absent (or held an unreadable value);
/// `Unavailable` means the cache could not be asked at all.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheLookup<T> {
    Hit(T),
    Miss,
    Unavailable,
}

impl<T> CacheLookup<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            CacheLookup::Hit(value) => Some(value),
            CacheLookup::Miss | CacheLookup::Unavailable => None,
        }
    }

    pub fn is_hit(&self) -> bool {
        matches!(self, CacheLookup::Hit(_))
    }
}

#[derive(Clone)]
enum Backend {
    Redis(RedisBackend),
    Memory(Arc<RwLock<MemoryStore>>),
    Disabled,
}

// == Cache Service ==
/// Injectable cache facade. Clones share the same backend and state.
#[derive(Clone)]
pub struct CacheService {
    backend: Backend,
    status: Arc<AtomicU8>,
    counters: Arc<LookupCounters>,
}

impl CacheService {
    fn with_backend(backend: Backend, status: CacheStatus) -> Self {
        Self {
            backend,
            status: Arc::new(AtomicU8::new(status.as_u8())),
            counters: Arc::new(LookupCounters::default()),
        }
    }

    // == Constructors ==
    /// Service backed by the in-memory fallback store.
    pub fn memory() -> Self {
        Self::memory_with_clock(Arc::new(SystemClock))
    }

    /// In-memory service on an injected clock, used to simulate TTL lapse.
    pub fn memory_with_clock(clock: Arc<dyn Clock>) -> Self {
        let store = MemoryStore::with_clock(clock);
        // The fallback is not an enabled backend
        Self::with_backend(Backend::Memory(Arc::new(RwLock::new(store))), CacheStatus::Disabled)
    }

    /// Service that caches nothing: every read misses, every write is dropped.
    pub fn disabled() -> Self {
        Self::with_backend(Backend::Disabled, CacheStatus::Disabled)
    }

    /// Builds the service from configuration.
    ///
    /// No `redis_url` selects the memory fallback. A configured but unreachable
    /// backend yields a disabled service; startup never fails.
    pub async fn connect(config: &Config) -> Self {
        let Some(url) = config.redis_url.as_deref() else {
            info!("No cache backend configured, using in-memory fallback");
            return Self::memory();
        };

        let service = Self::with_backend(Backend::Disabled, CacheStatus::Connecting);
        match RedisBackend::connect(url, config.connect_timeout()).await {
            Ok(redis) => {
                info!("Cache backend connected");
                Self {
                    backend: Backend::Redis(redis),
                    ..service.transition(CacheStatus::Enabled)
                }
            }
            Err(e) => {
                warn!(error = %e, "Cache backend handshake failed, caching disabled");
                service.transition(CacheStatus::Disabled)
            }
        }
    }

    fn transition(self, status: CacheStatus) -> Self {
        self.status.store(status.as_u8(), Ordering::SeqCst);
        self
    }

    // == Status ==
    pub fn status(&self) -> CacheStatus {
        CacheStatus::from_u8(self.status.load(Ordering::SeqCst))
    }

    pub fn backend_kind(&self) -> BackendKind {
        match self.backend {
            Backend::Redis(_) => BackendKind::Redis,
            Backend::Memory(_) => BackendKind::Memory,
            Backend::Disabled => BackendKind::Disabled,
        }
    }

    /// Returns the Redis backend while the connection is up.
    fn live_redis(&self) -> Option<&RedisBackend> {
        match &self.backend {
            Backend::Redis(redis) if self.status() == CacheStatus::Enabled => Some(redis),
            _ => None,
        }
    }

    /// Logs a backend failure and drops to `Disabled` if the connection is gone.
    fn record_failure(&self, op: &'static str, key: &str, error: &CacheError) {
        if error.is_connection_loss() {
            let previous = self.status.swap(CacheStatus::Disabled.as_u8(), Ordering::SeqCst);
            if CacheStatus::from_u8(previous) != CacheStatus::Disabled {
                warn!(op, key = %key, error = %error, "Cache backend connection lost, caching disabled");
                return;
            }
        }
        warn!(op, key = %key, error = %error, "Cache operation failed");
    }

    // == Lookup ==
    /// Reads `key` and deserializes it into `T`.
    pub async fn lookup<T: DeserializeOwned>(&self, key: &str) -> CacheLookup<T> {
        let raw = match self.read_raw(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                self.counters.record_miss();
                debug!(key = %key, "cache miss");
                return CacheLookup::Miss;
            }
            Err(e) => return self.failed_lookup(key, e),
        };

        match serde_json::from_str(&raw) {
            Ok(value) => {
                self.counters.record_hit();
                debug!(key = %key, "cache hit");
                CacheLookup::Hit(value)
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to deserialize cached value");
                self.counters.record_miss();
                CacheLookup::Miss
            }
        }
    }

    /// Unavailable when there is no live backend; a per-key error is a miss.
    fn failed_lookup<T>(&self, key: &str, error: CacheError) -> CacheLookup<T> {
        self.counters.record_miss();
        if matches!(error, CacheError::Unavailable) {
            return CacheLookup::Unavailable;
        }
        self.record_failure("get", key, &error);
        if error.is_connection_loss() {
            CacheLookup::Unavailable
        } else {
            CacheLookup::Miss
        }
    }

    // == Get ==
    /// Returns the cached value, or None on a miss or any cache failure.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.lookup(key).await.into_option()
    }

    async fn read_raw(&self, key: &str) -> Result<Option<String>> {
        match &self.backend {
            Backend::Memory(store) => Ok(store.write().await.get(key)),
            Backend::Redis(_) => match self.live_redis() {
                Some(redis) => redis.get(key).await,
                None => Err(CacheError::Unavailable),
            },
            Backend::Disabled => Err(CacheError::Unavailable),
        }
    }

    // == Set ==
    /// Stores `value` under `key` for `ttl_seconds`. Failures are logged only.
    pub async fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T, ttl_seconds: u64) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to serialize value for cache");
                return;
            }
        };

        match &self.backend {
            Backend::Memory(store) => {
                store.write().await.set(key.to_string(), raw, ttl_seconds);
                debug!(key = %key, ttl_seconds, "cache set (memory)");
            }
            Backend::Redis(_) => {
                let Some(redis) = self.live_redis() else { return };
                match redis.set(key, &raw, ttl_seconds).await {
                    Ok(()) => debug!(key = %key, ttl_seconds, "cache set (redis)"),
                    Err(e) => self.record_failure("set", key, &e),
                }
            }
            Backend::Disabled => {}
        }
    }

    // == Invalidate ==
    /// Deletes every key matching `pattern` if it contains `*`, otherwise the
    /// single named key. Missing keys are a no-op.
    pub async fn invalidate(&self, pattern: &str) {
        if is_wildcard(pattern) {
            let compiled = match KeyPattern::new(pattern) {
                Ok(compiled) => compiled,
                Err(e) => {
                    warn!(pattern = %pattern, error = %e, "Invalid invalidation pattern");
                    return;
                }
            };
            self.invalidate_matching(&compiled).await;
        } else {
            self.invalidate_key(pattern).await;
        }
    }

    async fn invalidate_key(&self, key: &str) {
        match &self.backend {
            Backend::Memory(store) => {
                store.write().await.delete(key);
            }
            Backend::Redis(_) => {
                let Some(redis) = self.live_redis() else { return };
                if let Err(e) = redis.delete(key).await {
                    self.record_failure("invalidate", key, &e);
                }
            }
            Backend::Disabled => return,
        }
        debug!(key = %key, "cache invalidated");
    }

    async fn invalidate_matching(&self, pattern: &KeyPattern) {
        let removed = match &self.backend {
            Backend::Memory(store) => store.write().await.delete_matching(pattern) as u64,
            Backend::Redis(_) => {
                let Some(redis) = self.live_redis() else { return };
                match redis.delete_matching(pattern).await {
                    Ok(removed) => removed,
                    Err(e) => {
                        self.record_failure("invalidate", pattern.as_str(), &e);
                        return;
                    }
                }
            }
            Backend::Disabled => return,
        };
        debug!(pattern = %pattern.as_str(), removed, "cache pattern invalidated");
    }

    // == Clear ==
    /// Deletes every entry in the backend.
    ///
    /// On Redis this flushes the whole selected database, not just keys
    /// written by this service. Reserved for administrative use.
    pub async fn clear(&self) {
        match &self.backend {
            Backend::Memory(store) => store.write().await.clear(),
            Backend::Redis(_) => {
                let Some(redis) = self.live_redis() else { return };
                if let Err(e) = redis.flush().await {
                    self.record_failure("clear", "*", &e);
                    return;
                }
            }
            Backend::Disabled => return,
        }
        warn!(backend = ?self.backend_kind(), "Cache cleared");
    }

    // == Stats ==
    /// Best-effort introspection. Size fields are only reported while a
    /// backend is enabled; a failed size query leaves them empty.
    pub async fn stats(&self) -> CacheStats {
        let mut stats = CacheStats::disabled(self.backend_kind());
        stats.hits = self.counters.hits();
        stats.misses = self.counters.misses();

        let Some(redis) = self.live_redis() else {
            return stats;
        };

        stats.enabled = true;
        match redis.key_count().await {
            Ok(count) => stats.key_count = Some(count),
            Err(e) => self.record_failure("stats", "*", &e),
        }
        match redis.memory_used().await {
            Ok(memory) => stats.memory_used = memory,
            Err(e) => self.record_failure("stats", "*", &e),
        }
        // A connection drop during the queries above disables the service
        stats.enabled = self.status() == CacheStatus::Enabled;
        stats
    }
}

impl std::fmt::Debug for CacheService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheService")
            .field("backend", &self.backend_kind())
            .field("status", &self.status())
            .finish()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Profile {
        name: String,
    }

    #[tokio::test]
    async fn test_memory_set_and_get() {
        let cache = CacheService::memory();

        cache.set("user:1:profile", &Profile { name: "Ana".to_string() }, 900).await;
        let profile: Option<Profile> = cache.get("user:1:profile").await;

        assert_eq!(profile, Some(Profile { name: "Ana".to_string() }));
    }

    #[tokio::test]
    async fn test_lookup_distinguishes_miss_and_unavailable() {
        let memory = CacheService::memory();
        assert_eq!(memory.lookup::<i32>("nope").await, CacheLookup::Miss);

        let disabled = CacheService::disabled();
        disabled.set("x", &1, 60).await;
        assert_eq!(disabled.lookup::<i32>("x").await, CacheLookup::Unavailable);
    }

    #[tokio::test]
    async fn test_deserialization_failure_is_miss() {
        let cache = CacheService::memory();
        cache.set("n", "not a number", 60).await;

        assert_eq!(cache.lookup::<u32>("n").await, CacheLookup::Miss);
    }

    #[test]
    fn test_backend_error_classification() {
        let cache = CacheService::memory();
        let wrong_type = redis::RedisError::from((
            redis::ErrorKind::TypeError,
            "WRONGTYPE Operation against a key holding the wrong kind of value",
        ));

        let per_key: CacheLookup<i32> = cache.failed_lookup("k", CacheError::Backend(wrong_type));
        assert_eq!(per_key, CacheLookup::Miss);

        let lost: CacheLookup<i32> =
            cache.failed_lookup("k", CacheError::Connection("reset".to_string()));
        assert_eq!(lost, CacheLookup::Unavailable);

        let down: CacheLookup<i32> = cache.failed_lookup("k", CacheError::Unavailable);
        assert_eq!(down, CacheLookup::Unavailable);
        assert_eq!(cache.counters.misses(), 3);
    }

    #[tokio::test]
    async fn test_expiry_with_manual_clock() {
        let clock = ManualClock::new(0);
        let cache = CacheService::memory_with_clock(Arc::new(clock.clone()));

        cache.set("k", &42, 60).await;
        clock.advance_secs(59);
        assert_eq!(cache.get::<i32>("k").await, Some(42));

        clock.advance_secs(1);
        assert_eq!(cache.get::<i32>("k").await, None);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let cache = CacheService::memory();
        let other = cache.clone();

        cache.set("shared", &true, 60).await;
        assert_eq!(other.get::<bool>("shared").await, Some(true));
    }

    #[tokio::test]
    async fn test_metacharacter_pattern_does_not_overmatch() {
        let cache = CacheService::memory();
        cache.set("a", &1, 60).await;

        cache.invalidate("a[*").await;
        assert_eq!(cache.get::<i32>("a").await, Some(1));
    }

    #[tokio::test]
    async fn test_hit_and_miss_counters() {
        let cache = CacheService::memory();
        cache.set("a", &1, 60).await;
        let _ = cache.get::<i32>("a").await;
        let _ = cache.get::<i32>("b").await;

        let stats = cache.stats().await;
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
    }

    #[tokio::test]
    async fn test_memory_status_and_stats() {
        let cache = CacheService::memory();

        assert_eq!(cache.status(), CacheStatus::Disabled);
        assert_eq!(cache.backend_kind(), BackendKind::Memory);

        let stats = cache.stats().await;
        assert!(!stats.enabled);
        assert!(stats.key_count.is_none());
    }

    #[tokio::test]
    async fn test_connect_without_url_uses_memory() {
        let cache = CacheService::connect(&Config::default()).await;

        assert_eq!(cache.backend_kind(), BackendKind::Memory);
        cache.set("x", &1, 60).await;
        assert_eq!(cache.get::<i32>("x").await, Some(1));
    }

    #[tokio::test]
    async fn test_connect_unreachable_disables() {
        let mut config = Config::with_redis_url("redis://127.0.0.1:1/");
        config.connect_timeout_ms = 500;
        let cache = CacheService::connect(&config).await;

        assert_eq!(cache.status(), CacheStatus::Disabled);
        assert_eq!(cache.backend_kind(), BackendKind::Disabled);
    }

    #[test]
    fn test_status_roundtrip() {
        for status in [CacheStatus::Disabled, CacheStatus::Connecting, CacheStatus::Enabled] {
            assert_eq!(CacheStatus::from_u8(status.as_u8()), status);
        }
    }
}
