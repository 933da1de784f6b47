//! PostgreSQL implementation of domain repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::Domain;
use crate::domain::repositories::DomainRepository;
use crate::error::AppError;

/// PostgreSQL repository for custom domains.
pub struct PgDomainRepository {
    pool: Arc<PgPool>,
}

impl PgDomainRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DomainRepository for PgDomainRepository {
    async fn find_by_project(&self, project_id: &str) -> Result<Vec<Domain>, AppError> {
        let domains = sqlx::query_as::<_, Domain>(
            r#"
            SELECT slug, project_id
            FROM domains
            WHERE project_id = $1
            ORDER BY slug
            "#,
        )
        .bind(project_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(domains)
    }

    async fn delete_by_slug(&self, slug: &str) -> Result<(), AppError> {
        // Links reference their domain by name, not by key, so they go first.
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM links WHERE domain = $1")
            .bind(slug)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM domains WHERE slug = $1")
            .bind(slug)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(AppError::not_found(
                "Domain not found",
                json!({ "slug": slug }),
            ));
        }

        tx.commit().await?;
        Ok(())
    }
}
