//! Cache Module
//!
//! Cache facade over Redis with an in-memory fallback and lazy TTL expiry.

mod backend;
mod clock;
mod entry;
mod memory;
pub mod pattern;
mod service;
mod stats;


// Re-export public types
pub use backend::RedisBackend;
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use memory::MemoryStore;
pub use pattern::KeyPattern;
pub use service::{CacheLookup, CacheService, CacheStatus};
pub use stats::{BackendKind, CacheStats, LookupCounters};
