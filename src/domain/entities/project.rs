//! Project entity: the tenant-owned root of every teardown.

use serde::Serialize;

/// Projection of a project row carrying everything teardown needs.
///
/// A project owns custom domains, links on the shared default domains, an
/// optional uploaded logo and an optional billing subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Project {
    pub id: String,
    pub slug: String,
    pub stripe_id: Option<String>,
    pub logo: Option<String>,
}

impl Project {
    /// Creates a new Project instance.
    pub fn new(
        id: impl Into<String>,
        slug: impl Into<String>,
        stripe_id: Option<String>,
        logo: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            slug: slug.into(),
            stripe_id,
            logo,
        }
    }

    /// Object-storage key of the uploaded logo, if the project has one.
    ///
    /// Logos are stored under `logos/{project id}` regardless of the public URL
    /// recorded in the `logo` column.
    pub fn logo_object_key(&self) -> Option<String> {
        self.logo.as_ref().map(|_| format!("logos/{}", self.id))
    }
}
