//! Object storage trait and error types.

use async_trait::async_trait;

/// Errors that can occur while talking to object storage.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Invalid storage configuration: {0}")]
    Configuration(String),
    #[error("Object storage error for '{key}': {source}")]
    Backend {
        key: String,
        #[source]
        source: object_store::Error,
    },
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Bucket holding uploaded images and project logos.
///
/// # Implementations
///
/// - [`crate::infrastructure::storage::ObjectStoreStorage`] - any `object_store` backend
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Deletes the object at `key`.
    ///
    /// A missing object counts as deleted.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Backend`] for every other backend failure.
    async fn delete(&self, key: &str) -> StorageResult<()>;
}
