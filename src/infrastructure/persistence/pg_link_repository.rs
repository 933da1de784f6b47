//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{DefaultDomainLink, LinkOwner, LinkProjection};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// PostgreSQL repository for link discovery and reassignment.
///
/// Domain sets are bound as a single `TEXT[]` parameter and matched with `= ANY($n)`.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn find_default_domain_links(
        &self,
        project_id: &str,
        domains: &[String],
    ) -> Result<Vec<DefaultDomainLink>, AppError> {
        let links = sqlx::query_as::<_, DefaultDomainLink>(
            r#"
            SELECT domain, key, proxy
            FROM links
            WHERE project_id = $1 AND lower(domain) = ANY($2)
            "#,
        )
        .bind(project_id)
        .bind(domains)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(links)
    }

    async fn reassign_default_domain_links(
        &self,
        project_id: &str,
        domains: &[String],
        owner: &LinkOwner,
    ) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE links
            SET user_id = $3, project_id = $4
            WHERE project_id = $1 AND lower(domain) = ANY($2)
            "#,
        )
        .bind(project_id)
        .bind(domains)
        .bind(&owner.user_id)
        .bind(&owner.project_id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected())
    }

    async fn find_by_domain(&self, domain: &str) -> Result<Vec<LinkProjection>, AppError> {
        let links = sqlx::query_as::<_, LinkProjection>(
            r#"
            SELECT domain, key, proxy
            FROM links
            WHERE domain = $1
            "#,
        )
        .bind(domain)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(links)
    }
}
