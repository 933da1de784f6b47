//! Link projections used during teardown.

use serde::Serialize;

/// The fields of a link that teardown needs: where it lives in the cache and
/// whether it has a proxied image in object storage.
///
/// Read for links on custom domains and on the shared default domains alike.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct LinkProjection {
    pub domain: String,
    pub key: String,
    pub proxy: bool,
}

/// A [`LinkProjection`] on one of the shared default domains.
pub type DefaultDomainLink = LinkProjection;

impl LinkProjection {
    /// Creates a new link projection.
    pub fn new(domain: impl Into<String>, key: impl Into<String>, proxy: bool) -> Self {
        Self {
            domain: domain.into(),
            key: key.into(),
            proxy,
        }
    }

    /// Field name of this link inside its domain's cache hash.
    ///
    /// Keys resolve case-insensitively, so the cache stores them lower-cased.
    pub fn cache_key(&self) -> String {
        self.key.to_lowercase()
    }

    /// Object-storage key of the proxied image, keeping the key's original case.
    pub fn image_object_key(&self) -> String {
        format!("{}/{}", self.domain, self.key)
    }
}

/// Owner fields written onto links that are reassigned instead of deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkOwner {
    pub user_id: String,
    pub project_id: String,
}

impl LinkOwner {
    pub fn new(user_id: impl Into<String>, project_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            project_id: project_id.into(),
        }
    }
}
