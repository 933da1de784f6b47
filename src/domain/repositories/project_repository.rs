//! Repository trait for project rows.

use crate::domain::entities::Project;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the project row itself.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgProjectRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Finds a project by its slug.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Project>, AppError>;

    /// Deletes a project by its slug.
    ///
    /// The schema cascades the delete to the project's domains and links, so
    /// callers never delete those rows separately.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no project has this slug.
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete_by_slug(&self, slug: &str) -> Result<(), AppError>;
}
