//! Repository trait for link data access during teardown.

use crate::domain::entities::{DefaultDomainLink, LinkOwner, LinkProjection};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the link queries teardown issues.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Finds a project's links whose domain is one of `domains`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_default_domain_links(
        &self,
        project_id: &str,
        domains: &[String],
    ) -> Result<Vec<DefaultDomainLink>, AppError>;

    /// Moves a project's links on `domains` to a new owner.
    ///
    /// Returns the number of links updated.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn reassign_default_domain_links(
        &self,
        project_id: &str,
        domains: &[String],
        owner: &LinkOwner,
    ) -> Result<u64, AppError>;

    /// Lists every link served under a custom domain.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_domain(&self, domain: &str) -> Result<Vec<LinkProjection>, AppError>;
}
