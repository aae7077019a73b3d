//! Key Pattern Module
//!
//! Wildcard key patterns used by invalidation. `*` matches any substring;
//! every other character is literal, including regex and glob metacharacters.

use regex::Regex;

use crate::error::{CacheError, Result};

/// Wildcard marker recognised in invalidation patterns.
pub const WILDCARD: char = '*';

// == Key Pattern ==
/// A compiled invalidation pattern.
#[derive(Debug, Clone)]
pub struct KeyPattern {
    raw: String,
    regex: Regex,
}

impl KeyPattern {
    /// Compiles `pattern` into an anchored regular expression.
    ///
    /// `*` spans any character including newlines, like a Redis glob.
    pub fn new(pattern: &str) -> Result<Self> {
        let body = pattern
            .split(WILDCARD)
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join(".*");

        let regex = Regex::new(&format!("(?s)^{}$", body))
            .map_err(|e| CacheError::InvalidPattern(e.to_string()))?;

        Ok(Self {
            raw: pattern.to_string(),
            regex,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Checks whether `key` matches this pattern.
    pub fn matches(&self, key: &str) -> bool {
        self.regex.is_match(key)
    }

    /// Renders the pattern as a Redis `KEYS` glob with glob metacharacters escaped.
    pub fn to_redis_glob(&self) -> String {
        let mut glob = String::with_capacity(self.raw.len());
        for c in self.raw.chars() {
            if matches!(c, '?' | '[' | ']' | '\\') {
                glob.push('\\');
            }
            glob.push(c);
        }
        glob
    }
}

/// Returns true if `pattern` contains the wildcard marker.
pub fn is_wildcard(pattern: &str) -> bool {
    pattern.contains(WILDCARD)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_pattern() {
        let p = KeyPattern::new("properties:search:*").unwrap();

        assert!(p.matches("properties:search:abc"));
        assert!(p.matches("properties:search:"));
        assert!(!p.matches("properties:agency:1"));
        assert!(!p.matches("xproperties:search:abc"));
    }

    #[test]
    fn test_inner_wildcard() {
        let p = KeyPattern::new("user:*:profile").unwrap();

        assert!(p.matches("user:1:profile"));
        assert!(p.matches("user:abc:def:profile"));
        assert!(!p.matches("user:1:permissions"));
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        let p = KeyPattern::new("search:(a|b).+*").unwrap();

        assert!(p.matches("search:(a|b).+123"));
        assert!(!p.matches("search:a.123"));
        assert!(!p.matches("search:bb123"));
    }

    #[test]
    fn test_pattern_without_wildcard_is_exact() {
        let p = KeyPattern::new("agencies:list").unwrap();

        assert!(p.matches("agencies:list"));
        assert!(!p.matches("agencies:list:2"));
    }

    #[test]
    fn test_redis_glob_escaping() {
        let p = KeyPattern::new("locations:S?o [SP]*").unwrap();
        assert_eq!(p.to_redis_glob(), "locations:S\\?o \\[SP\\]*");
    }

    #[test]
    fn test_wildcard_spans_newlines() {
        let p = KeyPattern::new("notes:*").unwrap();

        assert!(p.matches("notes:a\nb"));
        assert!(p.matches("notes:\n"));
        assert!(!p.matches("other\nnotes:a"));
    }

    #[test]
    fn test_is_wildcard() {
        assert!(is_wildcard("a:*"));
        assert!(!is_wildcard("a:b"));
    }
}
