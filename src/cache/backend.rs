//! Redis backend for the cache service.

use std::time::Duration;

use redis::{aio::MultiplexedConnection, AsyncCommands, Client};

use crate::cache::KeyPattern;
use crate::error::{CacheError, Result};

/// Thin wrapper over a multiplexed Redis connection.
///
/// Errors are returned as-is; the service decides how to degrade.
#[derive(Clone)]
pub struct RedisBackend {
    conn: MultiplexedConnection,
}

impl RedisBackend {
    /// Opens a connection to `url`, bounded by `timeout`.
    pub async fn connect(url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::open(url)?;

        let conn = tokio::time::timeout(timeout, client.get_multiplexed_async_connection())
            .await
            .map_err(|_| CacheError::Connection(format!("handshake timed out after {:?}", timeout)))?
            .map_err(|e| CacheError::Connection(e.to_string()))?;

        let mut backend = Self { conn };
        backend.ping().await?;
        Ok(backend)
    }

    pub async fn ping(&mut self) -> Result<()> {
        let _: String = redis::cmd("PING").query_async(&mut self.conn).await?;
        Ok(())
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.conn.clone();
        Ok(conn.get(key).await?)
    }

    pub async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<()> {
        let mut conn = self.conn.clone();
        // Redis rejects EX 0
        let ttl = ttl_seconds.max(1);
        let _: () = conn.set_ex(key, value, ttl).await?;
        Ok(())
    }

    pub async fn delete(&self, key: &str) -> Result<u64> {
        let mut conn = self.conn.clone();
        Ok(conn.del(key).await?)
    }

    /// Deletes every key matching `pattern`. Returns the number removed.
    pub async fn delete_matching(&self, pattern: &KeyPattern) -> Result<u64> {
        let mut conn = self.conn.clone();
        let keys: Vec<String> = conn.keys(pattern.to_redis_glob()).await?;
        if keys.is_empty() {
            return Ok(0);
        }
        Ok(conn.del(&keys).await?)
    }

    pub async fn flush(&self) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: () = redis::cmd("FLUSHDB").query_async(&mut conn).await?;
        Ok(())
    }

    pub async fn key_count(&self) -> Result<u64> {
        let mut conn = self.conn.clone();
        Ok(redis::cmd("DBSIZE").query_async(&mut conn).await?)
    }

    /// Reads `used_memory_human` from `INFO memory`.
    pub async fn memory_used(&self) -> Result<Option<String>> {
        let mut conn = self.conn.clone();
        let info: String = redis::cmd("INFO").arg("memory").query_async(&mut conn).await?;
        Ok(parse_used_memory(&info))
    }
}

fn parse_used_memory(info: &str) -> Option<String> {
    info.lines()
        .find_map(|line| line.strip_prefix("used_memory_human:"))
        .map(|v| v.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_used_memory() {
        let info = "# Memory\r\nused_memory:1048576\r\nused_memory_human:1.00M\r\nused_memory_rss:0\r\n";
        assert_eq!(parse_used_memory(info).as_deref(), Some("1.00M"));
    }

    #[test]
    fn test_parse_used_memory_missing() {
        assert!(parse_used_memory("# Memory\r\n").is_none());
    }

    #[tokio::test]
    async fn test_connect_refused() {
        // Port 1 is never a Redis server
        let result = RedisBackend::connect("redis://127.0.0.1:1/", Duration::from_millis(500)).await;
        assert!(matches!(result, Err(CacheError::Connection(_))));
    }

    #[tokio::test]
    async fn test_connect_invalid_url() {
        let result = RedisBackend::connect("not a url", Duration::from_millis(500)).await;
        assert!(result.is_err());
    }
}
