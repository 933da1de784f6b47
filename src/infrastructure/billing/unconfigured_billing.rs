//! Billing provider used when no Stripe key is configured.

use super::service::{BillingError, BillingProvider, BillingResult, CancelledSubscription};
use async_trait::async_trait;
use tracing::debug;

/// Rejects every cancellation with [`BillingError::NotConfigured`].
pub struct UnconfiguredBilling;

impl UnconfiguredBilling {
    pub fn new() -> Self {
        debug!("Using UnconfiguredBilling (STRIPE_SECRET_KEY not set)");
        Self
    }
}

impl Default for UnconfiguredBilling {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BillingProvider for UnconfiguredBilling {
    async fn cancel_subscription(
        &self,
        _subscription_id: &str,
    ) -> BillingResult<CancelledSubscription> {
        Err(BillingError::NotConfigured)
    }
}
