//! Memory Store Module
//!
//! Process-local expiring map used when no external backend is configured.
//! Expiry is pull-based: entries are dropped when a read finds them stale.

use std::collections::HashMap;
use std::sync::Arc;

use crate::cache::{CacheEntry, Clock, KeyPattern, SystemClock};

// == Memory Store ==
/// Fallback key-value storage with lazy TTL expiry.
#[derive(Debug)]
pub struct MemoryStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Time source for stamping and expiring entries
    clock: Arc<dyn Clock>,
}

impl MemoryStore {
    // == Constructor ==
    /// Creates an empty store on the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            clock,
        }
    }

    // == Set ==
    /// Stores a serialized value; an existing key is overwritten and its TTL reset.
    pub fn set(&mut self, key: String, value: String, ttl_seconds: u64) {
        let entry = CacheEntry::new(value, ttl_seconds, self.clock.now_ms());
        self.entries.insert(key, entry);
    }

    // == Get ==
    /// Returns the serialized value if present and not expired.
    ///
    /// An expired entry is removed on the way out.
    pub fn get(&mut self, key: &str) -> Option<String> {
        let now = self.clock.now_ms();
        let entry = self.entries.get(key)?;
        if entry.is_expired(now) {
            self.entries.remove(key);
            return None;
        }
        Some(entry.value.clone())
    }

    // == Delete ==
    /// Removes a single key. Returns true if it existed.
    pub fn delete(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    // == Delete Matching ==
    /// Removes every key matching `pattern`. Returns the number removed.
    pub fn delete_matching(&mut self, pattern: &KeyPattern) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| !pattern.matches(key));
        before - self.entries.len()
    }

    // == Clear ==
    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    // == Length ==
    /// Number of stored entries, including ones not yet found stale.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}
