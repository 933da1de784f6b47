//! Wired-up services shared by the binaries.

use sqlx::PgPool;
use std::sync::Arc;

use crate::application::services::ProjectService;
use crate::infrastructure::persistence::{
    PgDomainRepository, PgLinkRepository, PgProjectRepository,
};

/// [`ProjectService`] backed by the PostgreSQL repositories.
pub type PgProjectService = ProjectService<PgProjectRepository, PgDomainRepository, PgLinkRepository>;

/// Application state holding the database pool and the teardown service.
#[derive(Clone)]
pub struct AppState {
    pub pool: Arc<PgPool>,
    pub project_service: Arc<PgProjectService>,
}

impl AppState {
    pub fn new(pool: Arc<PgPool>, project_service: Arc<PgProjectService>) -> Self {
        Self {
            pool,
            project_service,
        }
    }
}
