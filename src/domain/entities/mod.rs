//! Core domain entities touched by project teardown.
//!
//! Entities are plain data structures. They mirror the relational rows only as
//! far as teardown needs them; nothing here is persisted by this crate beyond
//! what the repositories delete or reassign.
//!
//! # Entity Types
//!
//! - [`Project`] - The tenant-owned root entity
//! - [`Domain`] - A custom domain owned by one project
//! - [`LinkProjection`] - The teardown-relevant fields of a link
//! - [`DefaultDomainLink`] - A link projection on one of the shared default domains
//! - [`LinkOwner`] - Owner fields used when reassigning links

pub mod domain;
pub mod link;
pub mod project;

pub use domain::Domain;
pub use link::{DefaultDomainLink, LinkOwner, LinkProjection};
pub use project::Project;
