//! [`ObjectStorage`] over the `object_store` crate (S3/R2, local files, memory).

use super::service::{ObjectStorage, StorageError, StorageResult};
use async_trait::async_trait;
use object_store::{
    ObjectStore,
    aws::{AmazonS3Builder, AmazonS3ConfigKey},
    local::LocalFileSystem,
    memory::InMemory,
    path::Path as ObjectPath,
};
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Object storage backed by any [`ObjectStore`] implementation.
pub struct ObjectStoreStorage {
    store: Arc<dyn ObjectStore>,
}

impl ObjectStoreStorage {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }

    /// Builds the storage from a DSN.
    ///
    /// Supported schemes:
    /// - `s3://[access_key:secret_key@]host[:port]/bucket` (S3 and R2-style endpoints)
    /// - `file:///path/to/storage`
    /// - `memory://`
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Configuration`] for malformed or unsupported DSNs.
    pub fn from_dsn(dsn: &str) -> StorageResult<Self> {
        let url = Url::parse(dsn)
            .map_err(|e| StorageError::Configuration(format!("invalid DSN: {}", e)))?;

        let store: Arc<dyn ObjectStore> = match url.scheme() {
            "file" => {
                let path = url.path();
                if path.is_empty() || path == "/" {
                    return Err(StorageError::Configuration(
                        "file DSN must specify a path: file:///path/to/storage".to_string(),
                    ));
                }
                Arc::new(
                    LocalFileSystem::new_with_prefix(path)
                        .map_err(|e| StorageError::Configuration(e.to_string()))?,
                )
            }
            "memory" => Arc::new(InMemory::new()),
            "s3" => Arc::new(
                s3_builder_from_dsn(&url)?
                    .build()
                    .map_err(|e| StorageError::Configuration(e.to_string()))?,
            ),
            scheme => {
                return Err(StorageError::Configuration(format!(
                    "unsupported storage scheme '{}', expected file, memory or s3",
                    scheme
                )));
            }
        };

        Ok(Self::new(store))
    }
}

/// Creates an S3 builder from `s3://[access_key:secret_key@]host[:port]/bucket`.
///
/// Hosts outside `amazonaws.com` are treated as S3-compatible endpoints and
/// addressed path-style. They get the `auto` region unless `AWS_REGION` or
/// `AWS_DEFAULT_REGION` is set; AWS hosts always keep the environment's region.
fn s3_builder_from_dsn(dsn: &Url) -> StorageResult<AmazonS3Builder> {
    let host = dsn
        .host_str()
        .ok_or_else(|| StorageError::Configuration("missing S3 host in DSN".to_string()))?;
    let bucket = dsn.path().trim_start_matches('/');

    if bucket.is_empty() {
        return Err(StorageError::Configuration(
            "S3 DSN must specify a bucket: s3://host/bucket".to_string(),
        ));
    }

    let mut builder = AmazonS3Builder::from_env().with_bucket_name(bucket);

    let access_key = dsn.username();
    if !access_key.is_empty() {
        builder = builder
            .with_access_key_id(access_key)
            .with_secret_access_key(dsn.password().unwrap_or(""));
    }

    if !host.contains("amazonaws.com") {
        if builder
            .get_config_value(&AmazonS3ConfigKey::Region)
            .is_none()
        {
            builder = builder.with_region("auto");
        }

        let endpoint = match dsn.port() {
            Some(443) | None => format!("https://{host}"),
            Some(port) => format!("http://{host}:{port}"),
        };
        builder = builder
            .with_endpoint(endpoint)
            .with_allow_http(true)
            .with_virtual_hosted_style_request(false);
    }

    Ok(builder)
}

#[async_trait]
impl ObjectStorage for ObjectStoreStorage {
    async fn delete(&self, key: &str) -> StorageResult<()> {
        match self.store.delete(&ObjectPath::from(key)).await {
            Ok(()) => {
                debug!("Storage DELETE: {}", key);
                Ok(())
            }
            Err(object_store::Error::NotFound { .. }) => {
                debug!("Storage DELETE: {} (already absent)", key);
                Ok(())
            }
            Err(source) => Err(StorageError::Backend {
                key: key.to_string(),
                source,
            }),
        }
    }
}
