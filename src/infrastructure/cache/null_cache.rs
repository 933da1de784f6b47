//! No-op cache implementation for disabled caching.

use super::service::{CacheResult, CacheService};
use async_trait::async_trait;
use tracing::debug;

/// A cache implementation that does nothing.
///
/// Used when Redis is not configured. There is nothing to remove, so every
/// removal succeeds with a count of zero.
pub struct NullCache;

impl NullCache {
    /// Creates a new NullCache instance.
    pub fn new() -> Self {
        debug!("Using NullCache (caching disabled)");
        Self
    }
}

impl Default for NullCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheService for NullCache {
    async fn remove_keys(&self, _namespace: &str, _keys: &[String]) -> CacheResult<u64> {
        Ok(0)
    }

    async fn remove_namespace(&self, _namespace: &str) -> CacheResult<u64> {
        Ok(0)
    }

    async fn health_check(&self) -> bool {
        true
    }
}
