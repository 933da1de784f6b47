//! Custom domain entity.

/// A custom hostname owned by exactly one project.
///
/// Custom domains have their own teardown path (see
/// [`crate::application::services::DomainTeardown`]), so project teardown only
/// needs their slugs.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Domain {
    pub slug: String,
    pub project_id: String,
}

impl Domain {
    /// Creates a new Domain instance.
    pub fn new(slug: impl Into<String>, project_id: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            project_id: project_id.into(),
        }
    }
}
