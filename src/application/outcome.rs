//! Per-action outcomes collected while tearing a project down.
//!
//! Every destructive step is described by a [`CleanupAction`] and settles into
//! an [`Outcome`]. [`settle_all`] runs a batch of actions concurrently and
//! waits for every one of them; a rejection never cancels a sibling.

use futures::future::{BoxFuture, join_all};
use serde::Serialize;
use std::fmt::Display;
use std::future::Future;
use tracing::{debug, warn};

use crate::application::services::DomainTeardownReport;
use crate::infrastructure::billing::CancelledSubscription;

/// The phase an action belongs to. Used as a log and metrics label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Cleanup,
    Teardown,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cleanup => "cleanup",
            Self::Teardown => "teardown",
        }
    }
}

/// One destructive step issued against a backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CleanupAction {
    /// Full teardown of a custom domain, minus its relational row.
    DomainTeardown { slug: String },
    /// Bulk removal of lower-cased keys from a default domain's cache hash.
    CacheRemoval { domain: String, keys: Vec<String> },
    /// Deletion of a default-domain link's proxied image.
    ImageDeletion { key: String },
    LogoDeletion { key: Option<String> },
    SubscriptionCancellation { subscription_id: Option<String> },
    ProjectDeletion { slug: String },
}

impl CleanupAction {
    /// Short label used in logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Self::DomainTeardown { .. } => "domain_teardown",
            Self::CacheRemoval { .. } => "cache_removal",
            Self::ImageDeletion { .. } => "image_deletion",
            Self::LogoDeletion { .. } => "logo_deletion",
            Self::SubscriptionCancellation { .. } => "subscription_cancellation",
            Self::ProjectDeletion { .. } => "project_deletion",
        }
    }
}

/// What a fulfilled action produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionValue {
    Completed,
    /// Nothing to do: no proxied image, no logo, or no subscription.
    Skipped,
    /// Number of cache entries removed.
    Removed(u64),
    Domain(DomainTeardownReport),
    Subscription(CancelledSubscription),
}

/// Settled result of a single action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Fulfilled { value: ActionValue },
    Rejected { reason: String },
}

/// An action paired with how it settled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionOutcome {
    pub action: CleanupAction,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl ActionOutcome {
    /// Wraps a settled result, logging it and counting it in metrics.
    pub fn record(phase: Phase, action: CleanupAction, result: Result<ActionValue, String>) -> Self {
        let status = match &result {
            Ok(_) => "fulfilled",
            Err(_) => "rejected",
        };
        metrics::counter!(
            "project_teardown_actions_total",
            "phase" => phase.as_str(),
            "action" => action.label(),
            "status" => status
        )
        .increment(1);

        let outcome = match result {
            Ok(value) => {
                debug!("{} {} fulfilled: {:?}", phase.as_str(), action.label(), value);
                Outcome::Fulfilled { value }
            }
            Err(reason) => {
                warn!(
                    "{} {} rejected ({:?}): {}",
                    phase.as_str(),
                    action.label(),
                    action,
                    reason
                );
                Outcome::Rejected { reason }
            }
        };

        Self { action, outcome }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self.outcome, Outcome::Rejected { .. })
    }
}

/// Outcomes of both concurrent phases of a project teardown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeardownReport {
    /// Fan-out cleanup outcomes, in the order the actions were enqueued.
    pub cleanup_outcomes: Vec<ActionOutcome>,
    /// Logo, subscription and project-row outcomes, in that order.
    pub teardown_outcomes: Vec<ActionOutcome>,
}

impl TeardownReport {
    /// Every rejected outcome across both phases.
    pub fn rejections(&self) -> impl Iterator<Item = &ActionOutcome> {
        self.cleanup_outcomes
            .iter()
            .chain(self.teardown_outcomes.iter())
            .filter(|o| o.is_rejected())
    }

    /// True when no action was rejected.
    pub fn is_clean(&self) -> bool {
        self.rejections().next().is_none()
    }
}

/// An action that has been prepared but not yet awaited.
pub struct PendingAction<'a> {
    action: CleanupAction,
    future: BoxFuture<'a, Result<ActionValue, String>>,
}

impl<'a> PendingAction<'a> {
    pub fn new<F, E>(action: CleanupAction, future: F) -> Self
    where
        F: Future<Output = Result<ActionValue, E>> + Send + 'a,
        E: Display,
    {
        Self {
            action,
            future: Box::pin(async move { future.await.map_err(|e| e.to_string()) }),
        }
    }

    /// An action that resolves immediately without touching any backend.
    pub fn skipped(action: CleanupAction) -> Self {
        Self {
            action,
            future: Box::pin(async { Ok(ActionValue::Skipped) }),
        }
    }
}

/// Runs every action concurrently and waits for all of them.
///
/// Rejections are captured, never propagated. The returned outcomes keep the
/// order of `actions`.
pub async fn settle_all(phase: Phase, actions: Vec<PendingAction<'_>>) -> Vec<ActionOutcome> {
    let (labels, futures): (Vec<_>, Vec<_>) = actions
        .into_iter()
        .map(|pending| (pending.action, pending.future))
        .unzip();

    join_all(futures)
        .await
        .into_iter()
        .zip(labels)
        .map(|(result, action)| ActionOutcome::record(phase, action, result))
        .collect()
}
