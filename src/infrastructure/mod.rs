//! Infrastructure layer for external integrations.
//!
//! This layer implements the interfaces teardown consumes, one module per backend.
//!
//! # Modules
//!
//! - [`billing`] - Subscription cancellation (Stripe)
//! - [`cache`] - Link-resolution cache (Redis and no-op implementations)
//! - [`persistence`] - PostgreSQL repository implementations
//! - [`storage`] - Object storage for images and logos

pub mod billing;
pub mod cache;
pub mod persistence;
pub mod storage;
