//! Cache Entry Module
//!
//! Defines the structure for fallback-store entries with TTL support.

// == Cache Entry ==
/// A single fallback entry: serialized JSON plus expiry metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// JSON-serialized value
    pub value: String,
    /// Creation timestamp (Unix milliseconds)
    pub created_at: u64,
    /// Expiration timestamp (Unix milliseconds)
    pub expires_at: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry stamped at `now_ms` that lives for `ttl_seconds`.
    ///
    /// # Arguments
    /// * `value` - Serialized value to store
    /// * `ttl_seconds` - TTL in seconds
    /// * `now_ms` - Current time from the store's clock
    pub fn new(value: String, ttl_seconds: u64, now_ms: u64) -> Self {
        Self {
            value,
            created_at: now_ms,
            expires_at: now_ms.saturating_add(ttl_seconds.saturating_mul(1000)),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now_ms`.
    ///
    /// An entry is expired once the current time is greater than or equal to
    /// the expiration time, so a zero TTL is never readable.
    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms >= self.expires_at
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_creation() {
        let entry = CacheEntry::new("\"v\"".to_string(), 60, 1_000);

        assert_eq!(entry.value, "\"v\"");
        assert_eq!(entry.created_at, 1_000);
        assert_eq!(entry.expires_at, 61_000);
        assert!(!entry.is_expired(1_000));
    }

    #[test]
    fn test_entry_expiration() {
        let entry = CacheEntry::new("1".to_string(), 1, 0);

        assert!(!entry.is_expired(999));
        assert!(entry.is_expired(1_000));
        assert!(entry.is_expired(5_000));
    }

    #[test]
    fn test_zero_ttl_is_immediately_expired() {
        let entry = CacheEntry::new("1".to_string(), 0, 42);
        assert!(entry.is_expired(42));
    }

    #[test]
    fn test_huge_ttl_saturates() {
        let entry = CacheEntry::new("1".to_string(), u64::MAX, 10);
        assert_eq!(entry.expires_at, u64::MAX);
        assert!(!entry.is_expired(u64::MAX - 1));
    }
}
