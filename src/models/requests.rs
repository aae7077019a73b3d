//! Request DTOs for the cache admin API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;
use serde_json::Value;

use crate::invalidation::ResourceTag;
use crate::keys::TtlTier;

/// Longest key accepted by the admin API, in bytes
pub const MAX_KEY_LENGTH: usize = 512;

/// Request body for `PUT /cache/entries`
///
/// `ttl` wins over `tier`; with neither, the short tier applies.
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    /// The cache key
    pub key: String,
    /// Any JSON value
    pub value: Value,
    /// Optional TTL in seconds
    #[serde(default)]
    pub ttl: Option<u64>,
    /// Optional named TTL tier
    #[serde(default)]
    pub tier: Option<TtlTier>,
}

impl SetRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.key.is_empty() {
            return Some("Key cannot be empty".to_string());
        }
        if self.key.len() > MAX_KEY_LENGTH {
            return Some(format!(
                "Key exceeds maximum length of {} bytes",
                MAX_KEY_LENGTH
            ));
        }
        if self.ttl == Some(0) {
            return Some("TTL must be greater than zero".to_string());
        }
        None
    }

    pub fn effective_ttl(&self) -> u64 {
        self.ttl
            .unwrap_or_else(|| self.tier.unwrap_or(TtlTier::Short).seconds())
    }
}

/// Request body for `POST /cache/invalidate`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InvalidateRequest {
    /// Exact key or `*` pattern
    #[serde(default)]
    pub pattern: Option<String>,
    /// Resource tags to invalidate as a batch
    #[serde(default)]
    pub tags: Vec<ResourceTag>,
}

impl InvalidateRequest {
    pub fn validate(&self) -> Option<String> {
        match &self.pattern {
            Some(p) if p.is_empty() => Some("Pattern cannot be empty".to_string()),
            None if self.tags.is_empty() => {
                Some("Either a pattern or at least one tag is required".to_string())
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_request_deserialize() {
        let json = r#"{"key": "user:1:profile", "value": {"name": "Ana"}}"#;
        let req: SetRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.key, "user:1:profile");
        assert_eq!(req.value["name"], "Ana");
        assert!(req.ttl.is_none());
        assert_eq!(req.effective_ttl(), 300);
    }

    #[test]
    fn test_set_request_ttl_and_tier() {
        let json = r#"{"key": "k", "value": 1, "tier": "static"}"#;
        let req: SetRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.effective_ttl(), 86_400);

        let json = r#"{"key": "k", "value": 1, "ttl": 60, "tier": "static"}"#;
        let req: SetRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.effective_ttl(), 60);
    }

    #[test]
    fn test_validate_set_request() {
        let mut req = SetRequest {
            key: "".to_string(),
            value: Value::Null,
            ttl: None,
            tier: None,
        };
        assert!(req.validate().is_some());

        req.key = "x".repeat(MAX_KEY_LENGTH + 1);
        assert!(req.validate().is_some());

        req.key = "valid".to_string();
        req.ttl = Some(0);
        assert!(req.validate().is_some());

        req.ttl = Some(60);
        assert!(req.validate().is_none());
    }

    #[test]
    fn test_validate_invalidate_request() {
        assert!(InvalidateRequest::default().validate().is_some());

        let req: InvalidateRequest = serde_json::from_str(r#"{"pattern": ""}"#).unwrap();
        assert!(req.validate().is_some());

        let req: InvalidateRequest = serde_json::from_str(r#"{"pattern": "a:*"}"#).unwrap();
        assert!(req.validate().is_none());

        let req: InvalidateRequest = serde_json::from_str(r#"{"tags": ["agencies"]}"#).unwrap();
        assert!(req.validate().is_none());
    }
}
