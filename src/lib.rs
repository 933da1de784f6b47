//! # Project Teardown
//!
//! Cascading deletion of a link-shortener project across every backend that
//! holds a piece of it: PostgreSQL, Redis, object storage and Stripe.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Entities and repository traits
//! - **Application Layer** ([`application`]) - Teardown orchestration and outcomes
//! - **Infrastructure Layer** ([`infrastructure`]) - PostgreSQL, Redis, object storage, Stripe
//!
//! ## Operations
//!
//! - [`ProjectService::delete_project`](application::services::ProjectService::delete_project) -
//!   removes the project's domains, cache entries, images, logo, subscription and row
//! - [`ProjectService::delete_project_admin`](application::services::ProjectService::delete_project_admin) -
//!   same, but reassigns default-domain links to the legal holding project instead of deleting them
//!
//! Both return a [`TeardownReport`](application::outcome::TeardownReport) with
//! one outcome per action, so callers can alert on anything left behind.
//!
//! ## Configuration
//!
//! Configuration is loaded from environment variables via [`config::Config`].

pub mod application;
pub mod bootstrap;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
pub mod prelude {
    pub use crate::application::outcome::{
        ActionOutcome, ActionValue, CleanupAction, Outcome, TeardownReport,
    };
    pub use crate::application::services::{
        Collaborators, DomainTeardown, DomainTeardownOptions, DomainTeardownReport,
        ProjectService, TeardownSettings,
    };
    pub use crate::domain::entities::{
        DefaultDomainLink, Domain, LinkOwner, LinkProjection, Project,
    };
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
