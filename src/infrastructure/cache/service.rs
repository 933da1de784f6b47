//! Cache service trait and error types.

use async_trait::async_trait;
use std::fmt;

/// Errors that can occur during cache operations.
#[derive(Debug)]
pub enum CacheError {
    ConnectionError(String),
    OperationError(String),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::ConnectionError(e) => write!(f, "Cache connection error: {}", e),
            Self::OperationError(e) => write!(f, "Cache operation error: {}", e),
        }
    }
}

impl std::error::Error for CacheError {}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Trait for the link-resolution cache.
///
/// Each domain owns one hash namespace whose fields are lower-cased link keys.
/// Unlike lookups, removals must report failures: a silently failed removal
/// leaves a dangling redirect behind.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed hash per domain
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Removes `keys` from the `namespace` hash in a single round trip.
    ///
    /// Returns the number of entries actually removed. Keys that are not
    /// present are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::OperationError`] if the backend rejects the command.
    async fn remove_keys(&self, namespace: &str, keys: &[String]) -> CacheResult<u64>;

    /// Drops a whole namespace hash.
    ///
    /// Returns the number of namespaces removed (0 or 1).
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::OperationError`] if the backend rejects the command.
    async fn remove_namespace(&self, namespace: &str) -> CacheResult<u64>;

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;
}
