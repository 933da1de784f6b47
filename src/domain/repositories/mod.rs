//! Repository trait definitions for the domain layer.
//!
//! These traits abstract the relational store. Concrete implementations live
//! in `crate::infrastructure::persistence`; mock implementations are generated
//! via `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`ProjectRepository`] - Project lookup and deletion
//! - [`DomainRepository`] - Custom domain discovery and deletion
//! - [`LinkRepository`] - Default-domain link discovery and reassignment

pub mod domain_repository;
pub mod link_repository;
pub mod project_repository;

pub use domain_repository::DomainRepository;
pub use link_repository::LinkRepository;
pub use project_repository::ProjectRepository;

#[cfg(test)]
pub use domain_repository::MockDomainRepository;
#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use project_repository::MockProjectRepository;
