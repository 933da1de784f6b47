//! Repository trait for custom domains.

use crate::domain::entities::Domain;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for custom domains owned by projects.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgDomainRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DomainRepository: Send + Sync {
    /// Lists every custom domain owned by a project.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_project(&self, project_id: &str) -> Result<Vec<Domain>, AppError>;

    /// Deletes a domain row by slug together with every link served under it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the domain does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete_by_slug(&self, slug: &str) -> Result<(), AppError>;
}
