//! Billing provider trait and error types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Errors returned by a billing provider.
#[derive(Debug, thiserror::Error)]
pub enum BillingError {
    #[error("Billing provider is not configured")]
    NotConfigured,
    #[error("Billing request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Billing provider rejected the request ({status}): {message}")]
    Provider { status: u16, message: String },
}

/// Result type for billing operations.
pub type BillingResult<T> = Result<T, BillingError>;

/// The subscription state reported back after cancellation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelledSubscription {
    pub id: String,
    pub status: String,
}

/// Payment provider holding project subscriptions.
///
/// # Implementations
///
/// - [`crate::infrastructure::billing::StripeBilling`] - Stripe REST API
/// - [`crate::infrastructure::billing::UnconfiguredBilling`] - Rejects every call
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BillingProvider: Send + Sync {
    /// Cancels the subscription with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`BillingError::Provider`] when the provider refuses the
    /// cancellation and [`BillingError::Http`] on transport failures.
    async fn cancel_subscription(&self, subscription_id: &str)
    -> BillingResult<CancelledSubscription>;
}
