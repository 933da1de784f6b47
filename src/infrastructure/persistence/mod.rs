//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx.
//!
//! # Repositories
//!
//! - [`PgProjectRepository`] - Project lookup and cascading delete
//! - [`PgDomainRepository`] - Custom domain discovery and deletion
//! - [`PgLinkRepository`] - Link discovery and reassignment

pub mod pg_domain_repository;
pub mod pg_link_repository;
pub mod pg_project_repository;

pub use pg_domain_repository::PgDomainRepository;
pub use pg_link_repository::PgLinkRepository;
pub use pg_project_repository::PgProjectRepository;
