//! Business logic services for the application layer.

pub mod domain_service;
pub mod project_service;

pub use domain_service::{
    DomainTeardown, DomainTeardownOptions, DomainTeardownReport, DomainTeardownService,
};
pub use project_service::{Collaborators, ProjectService, TeardownSettings, group_cache_keys};
