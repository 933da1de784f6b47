//! Project teardown orchestration.
//!
//! A project owns resources in four backends that share no transaction:
//! PostgreSQL rows, Redis hashes, object-storage images and a Stripe
//! subscription. Teardown runs in three strictly ordered phases:
//!
//! 1. **Discovery** - custom domains plus default-domain links (read, or
//!    reassigned to the legal holding owner in the admin variant). Fail-fast.
//! 2. **Fan-out cleanup** - domain teardowns, cache removals and image
//!    deletions run concurrently; every outcome is captured, none aborts.
//! 3. **Final teardown** - logo, subscription and project row concurrently.
//!    Logo and subscription failures are reported as outcomes; a failed
//!    project-row delete is the operation's error.
//!
//! The project row is deleted only after every cleanup action has settled.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use serde_json::json;
use tracing::{error, info};

use crate::application::outcome::{
    ActionOutcome, ActionValue, CleanupAction, PendingAction, Phase, TeardownReport, settle_all,
};
use crate::application::services::domain_service::{DomainTeardown, DomainTeardownOptions};
use crate::domain::entities::{DefaultDomainLink, Domain, LinkOwner, Project};
use crate::domain::repositories::{DomainRepository, LinkRepository, ProjectRepository};
use crate::error::AppError;
use crate::infrastructure::billing::BillingProvider;
use crate::infrastructure::cache::CacheService;
use crate::infrastructure::storage::ObjectStorage;

/// Process-wide settings that decide what teardown touches.
#[derive(Debug, Clone)]
pub struct TeardownSettings {
    /// Shared default domains. Links on these have no per-domain teardown
    /// path and are cleaned up by the project teardown itself.
    pub default_domains: Vec<String>,
    /// New owner of default-domain links retained by the admin variant.
    pub legal_owner: LinkOwner,
}

/// Non-relational backends and the domain teardown collaborator.
#[derive(Clone)]
pub struct Collaborators {
    pub domain_teardown: Arc<dyn DomainTeardown>,
    pub cache: Arc<dyn CacheService>,
    pub storage: Arc<dyn ObjectStorage>,
    pub billing: Arc<dyn BillingProvider>,
}

/// Groups default-domain links into one cache removal per domain.
///
/// Keys are lower-cased and de-duplicated; both maps and key lists are sorted.
pub fn group_cache_keys(links: &[DefaultDomainLink]) -> BTreeMap<String, Vec<String>> {
    let mut grouped: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

    for link in links {
        grouped
            .entry(link.domain.clone())
            .or_default()
            .insert(link.cache_key());
    }

    grouped
        .into_iter()
        .map(|(domain, keys)| (domain, keys.into_iter().collect()))
        .collect()
}

/// Service deleting projects and everything they own.
pub struct ProjectService<P, D, L>
where
    P: ProjectRepository,
    D: DomainRepository,
    L: LinkRepository,
{
    project_repository: Arc<P>,
    domain_repository: Arc<D>,
    link_repository: Arc<L>,
    collaborators: Collaborators,
    settings: TeardownSettings,
}

impl<P, D, L> ProjectService<P, D, L>
where
    P: ProjectRepository,
    D: DomainRepository,
    L: LinkRepository,
{
    /// Creates a new project service.
    pub fn new(
        project_repository: Arc<P>,
        domain_repository: Arc<D>,
        link_repository: Arc<L>,
        collaborators: Collaborators,
        settings: TeardownSettings,
    ) -> Self {
        Self {
            project_repository,
            domain_repository,
            link_repository,
            collaborators,
            settings,
        }
    }

    /// Looks up a project by slug.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no project has this slug.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_project(&self, slug: &str) -> Result<Project, AppError> {
        self.project_repository
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::not_found("Project not found", json!({ "slug": slug })))
    }

    /// Deletes a project, its custom domains, its default-domain links' cache
    /// entries and images, its logo and its subscription.
    ///
    /// # Errors
    ///
    /// Returns the discovery error if custom domains or default-domain links
    /// cannot be read; nothing has been deleted in that case.
    ///
    /// Returns the project-row delete error (e.g. [`AppError::NotFound`]) with
    /// every collected outcome attached under `cleanup_outcomes` and
    /// `teardown_outcomes` in the error details.
    pub async fn delete_project(&self, project: &Project) -> Result<TeardownReport, AppError> {
        info!("Deleting project {} ({})", project.slug, project.id);

        let (custom_domains, default_domain_links) = tokio::try_join!(
            self.domain_repository.find_by_project(&project.id),
            self.link_repository
                .find_default_domain_links(&project.id, &self.settings.default_domains),
        )
        .inspect_err(|e| error!("Discovery failed for project {}: {}", project.slug, e))?;

        info!(
            "Project {}: {} custom domains, {} default-domain links",
            project.slug,
            custom_domains.len(),
            default_domain_links.len()
        );

        let mut actions = self.domain_teardown_actions(&custom_domains);

        let cache = &self.collaborators.cache;
        actions.extend(
            group_cache_keys(&default_domain_links)
                .into_iter()
                .map(|(domain, keys)| {
                    let action = CleanupAction::CacheRemoval {
                        domain: domain.clone(),
                        keys: keys.clone(),
                    };
                    PendingAction::new(action, async move {
                        cache
                            .remove_keys(&domain, &keys)
                            .await
                            .map(ActionValue::Removed)
                    })
                }),
        );

        let storage = &self.collaborators.storage;
        actions.extend(default_domain_links.iter().map(|link| {
            let key = link.image_object_key();
            let action = CleanupAction::ImageDeletion { key: key.clone() };
            if link.proxy {
                PendingAction::new(action, async move {
                    storage.delete(&key).await.map(|()| ActionValue::Completed)
                })
            } else {
                PendingAction::skipped(action)
            }
        }));

        let cleanup_outcomes = settle_all(Phase::Cleanup, actions).await;
        self.finish("delete", project, cleanup_outcomes).await
    }

    /// Deletes a project while retaining its default-domain links.
    ///
    /// The links are reassigned to the legal holding user and project instead
    /// of being deleted, so their cache entries and images stay in place. Custom
    /// domains, the logo, the subscription and the project row are removed as
    /// in [`Self::delete_project`].
    ///
    /// # Errors
    ///
    /// See [`Self::delete_project`].
    pub async fn delete_project_admin(
        &self,
        project: &Project,
    ) -> Result<TeardownReport, AppError> {
        info!(
            "Deleting project {} ({}) with legal retention",
            project.slug, project.id
        );

        let (custom_domains, reassigned) = tokio::try_join!(
            self.domain_repository.find_by_project(&project.id),
            self.link_repository.reassign_default_domain_links(
                &project.id,
                &self.settings.default_domains,
                &self.settings.legal_owner,
            ),
        )
        .inspect_err(|e| error!("Discovery failed for project {}: {}", project.slug, e))?;

        info!(
            "Project {}: reassigned {} default-domain links to project {}",
            project.slug, reassigned, self.settings.legal_owner.project_id
        );

        let actions = self.domain_teardown_actions(&custom_domains);
        let cleanup_outcomes = settle_all(Phase::Cleanup, actions).await;
        self.finish("admin", project, cleanup_outcomes).await
    }

    fn domain_teardown_actions<'a>(&'a self, domains: &[Domain]) -> Vec<PendingAction<'a>> {
        let teardown = &self.collaborators.domain_teardown;

        domains
            .iter()
            .map(|domain| {
                let slug = domain.slug.clone();
                let action = CleanupAction::DomainTeardown { slug: slug.clone() };
                PendingAction::new(action, async move {
                    // The project row's cascade removes the domain row.
                    let options = DomainTeardownOptions {
                        skip_relational_delete: true,
                    };
                    teardown
                        .teardown(&slug, options)
                        .await
                        .map(ActionValue::Domain)
                        .map_err(|e| format!("{}: {}", e, e.details()))
                })
            })
            .collect()
    }

    /// Runs the final teardown phase and assembles the report.
    async fn finish(
        &self,
        variant: &'static str,
        project: &Project,
        cleanup_outcomes: Vec<ActionOutcome>,
    ) -> Result<TeardownReport, AppError> {
        let logo_key = project.logo_object_key();
        let subscription_id = project.stripe_id.clone();

        let (logo, subscription, deleted) = tokio::join!(
            async {
                match &logo_key {
                    Some(key) => self
                        .collaborators
                        .storage
                        .delete(key)
                        .await
                        .map(|()| ActionValue::Completed)
                        .map_err(|e| e.to_string()),
                    None => Ok(ActionValue::Skipped),
                }
            },
            async {
                match &subscription_id {
                    Some(id) => self
                        .collaborators
                        .billing
                        .cancel_subscription(id)
                        .await
                        .map(ActionValue::Subscription)
                        .map_err(|e| e.to_string()),
                    None => Ok(ActionValue::Skipped),
                }
            },
            self.project_repository.delete_by_slug(&project.slug),
        );

        let mut teardown_outcomes = vec![
            ActionOutcome::record(
                Phase::Teardown,
                CleanupAction::LogoDeletion { key: logo_key },
                logo,
            ),
            ActionOutcome::record(
                Phase::Teardown,
                CleanupAction::SubscriptionCancellation { subscription_id },
                subscription,
            ),
        ];
        let project_action = CleanupAction::ProjectDeletion {
            slug: project.slug.clone(),
        };

        if let Err(e) = deleted {
            teardown_outcomes.push(ActionOutcome::record(
                Phase::Teardown,
                project_action,
                Err(e.to_string()),
            ));
            metrics::counter!("project_teardown_total", "variant" => variant, "status" => "failed")
                .increment(1);
            error!("Project {} row was not deleted: {}", project.slug, e);

            return Err(e.with_details(json!({
                "cleanup_outcomes": cleanup_outcomes,
                "teardown_outcomes": teardown_outcomes,
            })));
        }

        teardown_outcomes.push(ActionOutcome::record(
            Phase::Teardown,
            project_action,
            Ok(ActionValue::Completed),
        ));

        let report = TeardownReport {
            cleanup_outcomes,
            teardown_outcomes,
        };
        let status = if report.is_clean() { "clean" } else { "partial" };
        metrics::counter!("project_teardown_total", "variant" => variant, "status" => status)
            .increment(1);
        info!(
            "Project {} deleted ({} rejected actions)",
            project.slug,
            report.rejections().count()
        );

        Ok(report)
    }
}
