//! Object storage for uploaded link images and project logos.
//!
//! Provides an [`ObjectStorage`] trait with one implementation,
//! [`ObjectStoreStorage`], that works against any `object_store` backend.

mod object_store_storage;
mod service;

pub use object_store_storage::ObjectStoreStorage;
pub use service::{ObjectStorage, StorageError, StorageResult};

#[cfg(test)]
pub use service::MockObjectStorage;
