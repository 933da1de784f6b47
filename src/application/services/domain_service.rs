//! Custom domain teardown service.

use async_trait::async_trait;
use futures::future::join_all;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::repositories::{DomainRepository, LinkRepository};
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;
use crate::infrastructure::storage::ObjectStorage;

/// Options for a single domain teardown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DomainTeardownOptions {
    /// Leave the domain row (and its links) in place because a cascading
    /// delete further up will remove them.
    pub skip_relational_delete: bool,
}

/// What a domain teardown removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainTeardownReport {
    pub slug: String,
    pub links: usize,
    pub cache_cleared: bool,
    pub images_deleted: usize,
    pub relational_deleted: bool,
}

/// Removes a custom domain together with its links, cache hash and images.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DomainTeardown: Send + Sync {
    /// Tears down the domain `slug`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] listing every failed step. All steps are
    /// attempted even when an earlier one fails.
    async fn teardown(
        &self,
        slug: &str,
        options: DomainTeardownOptions,
    ) -> Result<DomainTeardownReport, AppError>;
}

/// Default [`DomainTeardown`] over the relational store, cache and object storage.
///
/// Steps:
/// 1. Read every link under the domain
/// 2. Concurrently drop the domain's cache hash and delete proxied images
/// 3. Unless skipped, delete the domain row together with its links
pub struct DomainTeardownService<D: DomainRepository, L: LinkRepository> {
    domain_repository: Arc<D>,
    link_repository: Arc<L>,
    cache: Arc<dyn CacheService>,
    storage: Arc<dyn ObjectStorage>,
}

impl<D: DomainRepository, L: LinkRepository> DomainTeardownService<D, L> {
    /// Creates a new domain teardown service.
    pub fn new(
        domain_repository: Arc<D>,
        link_repository: Arc<L>,
        cache: Arc<dyn CacheService>,
        storage: Arc<dyn ObjectStorage>,
    ) -> Self {
        Self {
            domain_repository,
            link_repository,
            cache,
            storage,
        }
    }
}

#[async_trait]
impl<D: DomainRepository, L: LinkRepository> DomainTeardown for DomainTeardownService<D, L> {
    async fn teardown(
        &self,
        slug: &str,
        options: DomainTeardownOptions,
    ) -> Result<DomainTeardownReport, AppError> {
        let links = self.link_repository.find_by_domain(slug).await?;
        let image_keys: Vec<String> = links
            .iter()
            .filter(|link| link.proxy)
            .map(|link| link.image_object_key())
            .collect();

        let (cache_result, image_results) = tokio::join!(
            self.cache.remove_namespace(slug),
            join_all(image_keys.iter().map(|key| self.storage.delete(key))),
        );

        let mut failures = Vec::new();

        let cache_cleared = match cache_result {
            Ok(_) => true,
            Err(e) => {
                failures.push(json!({ "step": "cache", "reason": e.to_string() }));
                false
            }
        };

        let mut images_deleted = 0;
        for (key, result) in image_keys.iter().zip(image_results) {
            match result {
                Ok(()) => images_deleted += 1,
                Err(e) => failures.push(json!({
                    "step": "image",
                    "key": key,
                    "reason": e.to_string(),
                })),
            }
        }

        let mut relational_deleted = false;
        if !options.skip_relational_delete {
            match self.domain_repository.delete_by_slug(slug).await {
                Ok(()) => relational_deleted = true,
                Err(e) => failures.push(json!({ "step": "database", "reason": e.to_string() })),
            }
        }

        if !failures.is_empty() {
            warn!(
                "Domain {} teardown incomplete ({} failed steps)",
                slug,
                failures.len()
            );
            return Err(AppError::internal(
                "Domain teardown incomplete",
                json!({ "slug": slug, "failures": failures }),
            ));
        }

        info!(
            "Domain {} torn down: {} links, {} images",
            slug,
            links.len(),
            images_deleted
        );

        Ok(DomainTeardownReport {
            slug: slug.to_string(),
            links: links.len(),
            cache_cleared,
            images_deleted,
            relational_deleted,
        })
    }
}
