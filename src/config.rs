//! Configuration Module
//!
//! Handles loading cache configuration from environment variables.

use std::env;
use std::time::Duration;

/// Cache layer configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
/// A missing `REDIS_URL` is not an error: the cache falls back to process memory.
#[derive(Debug, Clone)]
pub struct Config {
    /// Redis connection string, None selects the in-memory fallback
    pub redis_url: Option<String>,
    /// Upper bound on the initial backend handshake in milliseconds
    pub connect_timeout_ms: u64,
    /// HTTP port for the admin surface
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `REDIS_URL` - Backend connection string (default: unset, memory fallback)
    /// - `CACHE_CONNECT_TIMEOUT_MS` - Handshake timeout (default: 2000)
    /// - `SERVER_PORT` - Admin HTTP port (default: 3000)
    pub fn from_env() -> Self {
        Self {
            redis_url: env::var("REDIS_URL")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
            connect_timeout_ms: env::var("CACHE_CONNECT_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(2000),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
        }
    }

    /// Configuration pointing at a Redis URL, other fields defaulted.
    pub fn with_redis_url(url: impl Into<String>) -> Self {
        Self {
            redis_url: Some(url.into()),
            ..Self::default()
        }
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            redis_url: None,
            connect_timeout_ms: 2000,
            server_port: 3000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.redis_url.is_none());
        assert_eq!(config.connect_timeout_ms, 2000);
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.connect_timeout(), Duration::from_secs(2));
    }

    #[test]
    fn test_config_from_env() {
        // Single test touches the environment to avoid races between tests
        env::remove_var("REDIS_URL");
        env::remove_var("CACHE_CONNECT_TIMEOUT_MS");
        env::remove_var("SERVER_PORT");

        let config = Config::from_env();
        assert!(config.redis_url.is_none());
        assert_eq!(config.connect_timeout_ms, 2000);
        assert_eq!(config.server_port, 3000);

        env::set_var("REDIS_URL", "   ");
        assert!(Config::from_env().redis_url.is_none());

        env::set_var("REDIS_URL", "redis://cache:6379");
        env::set_var("CACHE_CONNECT_TIMEOUT_MS", "250");
        let config = Config::from_env();
        assert_eq!(config.redis_url.as_deref(), Some("redis://cache:6379"));
        assert_eq!(config.connect_timeout_ms, 250);

        env::remove_var("REDIS_URL");
        env::remove_var("CACHE_CONNECT_TIMEOUT_MS");
    }

    #[test]
    fn test_with_redis_url() {
        let config = Config::with_redis_url("redis://127.0.0.1:6379");
        assert_eq!(config.redis_url.as_deref(), Some("redis://127.0.0.1:6379"));
        assert_eq!(config.server_port, 3000);
    }
}
