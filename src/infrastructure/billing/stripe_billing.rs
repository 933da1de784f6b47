//! Stripe implementation of [`BillingProvider`].

use super::service::{BillingError, BillingProvider, BillingResult, CancelledSubscription};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

const CANCELLATION_COMMENT: &str = "Customer deleted their project.";

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    error: StripeErrorDetail,
}

#[derive(Debug, Deserialize)]
struct StripeErrorDetail {
    message: Option<String>,
    code: Option<String>,
}

/// Cancels subscriptions through the Stripe REST API.
pub struct StripeBilling {
    base_url: String,
    secret_key: String,
    client: Client,
}

impl StripeBilling {
    /// Creates a Stripe client.
    ///
    /// `base_url` is normally `https://api.stripe.com`; tests point it at a mock server.
    ///
    /// # Errors
    ///
    /// Returns [`BillingError::Http`] if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, secret_key: impl Into<String>) -> BillingResult<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        info!("Stripe billing initialized (url={})", base_url);

        Ok(Self {
            base_url,
            secret_key: secret_key.into(),
            client: Client::builder().timeout(Duration::from_secs(30)).build()?,
        })
    }
}

#[async_trait]
impl BillingProvider for StripeBilling {
    async fn cancel_subscription(
        &self,
        subscription_id: &str,
    ) -> BillingResult<CancelledSubscription> {
        let response = self
            .client
            .delete(format!(
                "{}/v1/subscriptions/{}",
                self.base_url, subscription_id
            ))
            .bearer_auth(&self.secret_key)
            .form(&[("cancellation_details[comment]", CANCELLATION_COMMENT)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<StripeErrorBody>(&body) {
                Ok(parsed) => parsed
                    .error
                    .message
                    .or(parsed.error.code)
                    .unwrap_or_else(|| status.to_string()),
                Err(_) => status.to_string(),
            };
            return Err(BillingError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        let subscription = response.json::<CancelledSubscription>().await?;
        debug!(
            "Stripe subscription {} cancelled (status={})",
            subscription.id, subscription.status
        );

        Ok(subscription)
    }
}
