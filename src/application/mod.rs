//! Application layer orchestrating project teardown.
//!
//! Services consume repository traits and backend collaborators, and expose
//! the two teardown operations to callers.
//!
//! # Modules
//!
//! - [`services::project_service::ProjectService`] - Project deletion, plain and with legal retention
//! - [`services::domain_service::DomainTeardownService`] - Custom domain teardown
//! - [`outcome`] - Per-action outcomes and the settle-all join

pub mod outcome;
pub mod services;
