//! Billing provider integration.
//!
//! Provides a [`BillingProvider`] trait with two implementations:
//! - [`StripeBilling`] - Production Stripe client
//! - [`UnconfiguredBilling`] - Fallback that rejects every cancellation

mod service;
mod stripe_billing;
mod unconfigured_billing;

pub use service::{BillingError, BillingProvider, BillingResult, CancelledSubscription};
pub use stripe_billing::StripeBilling;
pub use unconfigured_billing::UnconfiguredBilling;

#[cfg(test)]
pub use service::MockBillingProvider;
