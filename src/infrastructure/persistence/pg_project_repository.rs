//! PostgreSQL implementation of project repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::Project;
use crate::domain::repositories::ProjectRepository;
use crate::error::AppError;

/// PostgreSQL repository for project rows.
///
/// Deleting a project relies on `ON DELETE CASCADE` from `domains` and `links`.
pub struct PgProjectRepository {
    pool: Arc<PgPool>,
}

impl PgProjectRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectRepository for PgProjectRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Project>, AppError> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, slug, stripe_id, logo
            FROM projects
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(project)
    }

    async fn delete_by_slug(&self, slug: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM projects WHERE slug = $1")
            .bind(slug)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                "Project not found",
                json!({ "slug": slug }),
            ));
        }

        Ok(())
    }
}
