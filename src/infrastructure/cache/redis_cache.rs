//! Redis-backed cache implementation.

use super::service::{CacheError, CacheResult, CacheService};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, info, warn};

/// Redis cache holding one hash per domain.
///
/// Uses connection pooling via `ConnectionManager` for efficient connection reuse.
/// Removal errors are logged and returned so teardown can report them.
pub struct RedisCache {
    client: ConnectionManager,
}

impl RedisCache {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConnectionError`] if the URL is invalid, the connection cannot
    /// be established, or the PING health check fails.
    pub async fn connect(redis_url: &str) -> CacheResult<Self> {
        info!("Connecting to Redis");

        let client = Client::open(redis_url).map_err(|e| {
            CacheError::ConnectionError(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            CacheError::ConnectionError(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::ConnectionError(format!("Redis PING failed: {}", e)))?;

        info!("✓ Connected to Redis");

        Ok(Self { client: manager })
    }
}

#[async_trait]
impl CacheService for RedisCache {
    async fn remove_keys(&self, namespace: &str, keys: &[String]) -> CacheResult<u64> {
        // HDEL without fields is a syntax error on the server.
        if keys.is_empty() {
            return Ok(0);
        }

        let mut conn = self.client.clone();

        match conn.hdel::<_, _, u64>(namespace, keys).await {
            Ok(removed) => {
                debug!(
                    "Cache HDEL: {} ({} requested, {} removed)",
                    namespace,
                    keys.len(),
                    removed
                );
                Ok(removed)
            }
            Err(e) => {
                warn!("Redis HDEL error for {}: {}", namespace, e);
                Err(CacheError::OperationError(e.to_string()))
            }
        }
    }

    async fn remove_namespace(&self, namespace: &str) -> CacheResult<u64> {
        let mut conn = self.client.clone();

        match conn.del::<_, u64>(namespace).await {
            Ok(removed) => {
                debug!("Cache DEL: {} ({} removed)", namespace, removed);
                Ok(removed)
            }
            Err(e) => {
                warn!("Redis DEL error for {}: {}", namespace, e);
                Err(CacheError::OperationError(e.to_string()))
            }
        }
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}
