#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::json;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use project_teardown::application::services::{
    Collaborators, DomainTeardownService, ProjectService, TeardownSettings,
};
use project_teardown::domain::entities::{
    DefaultDomainLink, Domain, LinkOwner, LinkProjection, Project,
};
use project_teardown::domain::repositories::{DomainRepository, LinkRepository, ProjectRepository};
use project_teardown::error::AppError;
use project_teardown::infrastructure::billing::{
    BillingError, BillingProvider, BillingResult, CancelledSubscription,
};
use project_teardown::infrastructure::cache::{CacheError, CacheResult, CacheService};
use project_teardown::infrastructure::storage::{ObjectStorage, StorageError, StorageResult};

pub const LEGAL_USER: &str = "legal-user";
pub const LEGAL_PROJECT: &str = "legal-project";

/// Shared, ordered record of every side effect the fakes perform.
#[derive(Clone, Default)]
pub struct EventLog(Arc<Mutex<Vec<String>>>);

impl EventLog {
    pub fn push(&self, event: impl Into<String>) {
        self.0.lock().unwrap().push(event.into());
    }

    pub fn events(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn position(&self, event: &str) -> Option<usize> {
        self.events().iter().position(|e| e == event)
    }

    pub fn contains(&self, event: &str) -> bool {
        self.position(event).is_some()
    }
}

#[derive(Debug, Clone)]
pub struct StoredLink {
    pub domain: String,
    pub key: String,
    pub proxy: bool,
    pub user_id: String,
    pub project_id: String,
}

impl StoredLink {
    pub fn new(domain: &str, key: &str, proxy: bool, project_id: &str) -> Self {
        Self {
            domain: domain.to_string(),
            key: key.to_string(),
            proxy,
            user_id: "owner".to_string(),
            project_id: project_id.to_string(),
        }
    }

    fn to_link(&self) -> LinkProjection {
        LinkProjection::new(&self.domain, &self.key, self.proxy)
    }
}

/// In-memory relational store emulating the cascading schema.
#[derive(Default)]
pub struct Database {
    pub projects: Mutex<Vec<Project>>,
    pub domains: Mutex<Vec<Domain>>,
    pub links: Mutex<Vec<StoredLink>>,
    pub fail_discovery: Mutex<bool>,
}

impl Database {
    pub fn project_exists(&self, slug: &str) -> bool {
        self.projects.lock().unwrap().iter().any(|p| p.slug == slug)
    }

    pub fn links_owned_by(&self, project_id: &str) -> Vec<StoredLink> {
        self.links
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.project_id == project_id)
            .cloned()
            .collect()
    }

    fn check_discovery(&self) -> Result<(), AppError> {
        if *self.fail_discovery.lock().unwrap() {
            return Err(AppError::internal(
                "Database error",
                json!({ "reason": "connection reset" }),
            ));
        }
        Ok(())
    }
}

pub struct FakeProjects {
    db: Arc<Database>,
    log: EventLog,
}

#[async_trait]
impl ProjectRepository for FakeProjects {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Project>, AppError> {
        Ok(self
            .db
            .projects
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.slug == slug)
            .cloned())
    }

    async fn delete_by_slug(&self, slug: &str) -> Result<(), AppError> {
        let mut projects = self.db.projects.lock().unwrap();
        let Some(index) = projects.iter().position(|p| p.slug == slug) else {
            return Err(AppError::not_found(
                "Project not found",
                json!({ "slug": slug }),
            ));
        };
        let project = projects.remove(index);

        self.db
            .domains
            .lock()
            .unwrap()
            .retain(|d| d.project_id != project.id);
        self.db
            .links
            .lock()
            .unwrap()
            .retain(|l| l.project_id != project.id);

        self.log.push(format!("db.delete_project:{slug}"));
        Ok(())
    }
}

pub struct FakeDomains {
    db: Arc<Database>,
    log: EventLog,
}

#[async_trait]
impl DomainRepository for FakeDomains {
    async fn find_by_project(&self, project_id: &str) -> Result<Vec<Domain>, AppError> {
        self.db.check_discovery()?;
        let mut domains: Vec<Domain> = self
            .db
            .domains
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.project_id == project_id)
            .cloned()
            .collect();
        domains.sort_by(|a, b| a.slug.cmp(&b.slug));
        Ok(domains)
    }

    async fn delete_by_slug(&self, slug: &str) -> Result<(), AppError> {
        self.db.links.lock().unwrap().retain(|l| l.domain != slug);
        self.db.domains.lock().unwrap().retain(|d| d.slug != slug);
        self.log.push(format!("db.delete_domain:{slug}"));
        Ok(())
    }
}

pub struct FakeLinks {
    db: Arc<Database>,
    log: EventLog,
}

#[async_trait]
impl LinkRepository for FakeLinks {
    async fn find_default_domain_links(
        &self,
        project_id: &str,
        domains: &[String],
    ) -> Result<Vec<DefaultDomainLink>, AppError> {
        Ok(self
            .db
            .links
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.project_id == project_id && domains.contains(&l.domain.to_lowercase()))
            .map(StoredLink::to_link)
            .collect())
    }

    async fn reassign_default_domain_links(
        &self,
        project_id: &str,
        domains: &[String],
        owner: &LinkOwner,
    ) -> Result<u64, AppError> {
        let mut updated = 0;
        for link in self.db.links.lock().unwrap().iter_mut() {
            if link.project_id == project_id && domains.contains(&link.domain.to_lowercase()) {
                link.user_id = owner.user_id.clone();
                link.project_id = owner.project_id.clone();
                updated += 1;
            }
        }
        self.log.push(format!("db.reassign:{updated}"));
        Ok(updated)
    }

    async fn find_by_domain(&self, domain: &str) -> Result<Vec<LinkProjection>, AppError> {
        Ok(self
            .db
            .links
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.domain == domain)
            .map(StoredLink::to_link)
            .collect())
    }
}

/// Cache fake that records removals and fails for selected namespaces.
#[derive(Default)]
pub struct RecordingCache {
    log: EventLog,
    pub failing_namespaces: Mutex<HashSet<String>>,
}

impl RecordingCache {
    fn check(&self, namespace: &str) -> CacheResult<()> {
        if self.failing_namespaces.lock().unwrap().contains(namespace) {
            return Err(CacheError::OperationError(format!(
                "READONLY while touching {namespace}"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl CacheService for RecordingCache {
    async fn remove_keys(&self, namespace: &str, keys: &[String]) -> CacheResult<u64> {
        self.check(namespace)?;
        self.log
            .push(format!("cache.hdel:{namespace}:{}", keys.join(",")));
        Ok(keys.len() as u64)
    }

    async fn remove_namespace(&self, namespace: &str) -> CacheResult<u64> {
        self.check(namespace)?;
        self.log.push(format!("cache.del:{namespace}"));
        Ok(1)
    }

    async fn health_check(&self) -> bool {
        true
    }
}

/// Object storage fake that records deletions and fails for selected keys.
#[derive(Default)]
pub struct RecordingStorage {
    log: EventLog,
    pub failing_keys: Mutex<HashSet<String>>,
}

#[async_trait]
impl ObjectStorage for RecordingStorage {
    async fn delete(&self, key: &str) -> StorageResult<()> {
        if self.failing_keys.lock().unwrap().contains(key) {
            return Err(StorageError::Configuration(format!("bucket unavailable for {key}")));
        }
        self.log.push(format!("storage.delete:{key}"));
        Ok(())
    }
}

/// Billing fake that records cancellations.
#[derive(Default)]
pub struct RecordingBilling {
    log: EventLog,
    pub fail: Mutex<bool>,
}

#[async_trait]
impl BillingProvider for RecordingBilling {
    async fn cancel_subscription(
        &self,
        subscription_id: &str,
    ) -> BillingResult<CancelledSubscription> {
        if *self.fail.lock().unwrap() {
            return Err(BillingError::Provider {
                status: 404,
                message: format!("No such subscription: '{subscription_id}'"),
            });
        }
        self.log.push(format!("billing.cancel:{subscription_id}"));
        Ok(CancelledSubscription {
            id: subscription_id.to_string(),
            status: "canceled".to_string(),
        })
    }
}

pub type TestProjectService = ProjectService<FakeProjects, FakeDomains, FakeLinks>;

/// Every fake plus the service wired over them.
pub struct Harness {
    pub db: Arc<Database>,
    pub log: EventLog,
    pub cache: Arc<RecordingCache>,
    pub storage: Arc<RecordingStorage>,
    pub billing: Arc<RecordingBilling>,
    pub service: TestProjectService,
}

impl Harness {
    pub fn new() -> Self {
        let db = Arc::new(Database::default());
        let log = EventLog::default();

        let cache = Arc::new(RecordingCache {
            log: log.clone(),
            ..Default::default()
        });
        let storage = Arc::new(RecordingStorage {
            log: log.clone(),
            ..Default::default()
        });
        let billing = Arc::new(RecordingBilling {
            log: log.clone(),
            ..Default::default()
        });

        let projects = Arc::new(FakeProjects {
            db: db.clone(),
            log: log.clone(),
        });
        let domains = Arc::new(FakeDomains {
            db: db.clone(),
            log: log.clone(),
        });
        let links = Arc::new(FakeLinks {
            db: db.clone(),
            log: log.clone(),
        });

        let domain_teardown = Arc::new(DomainTeardownService::new(
            domains.clone(),
            links.clone(),
            cache.clone(),
            storage.clone(),
        ));

        let service = ProjectService::new(
            projects,
            domains,
            links,
            Collaborators {
                domain_teardown,
                cache: cache.clone(),
                storage: storage.clone(),
                billing: billing.clone(),
            },
            TeardownSettings {
                default_domains: vec!["dub.sh".to_string(), "chatg.pt".to_string()],
                legal_owner: LinkOwner::new(LEGAL_USER, LEGAL_PROJECT),
            },
        );

        Self {
            db,
            log,
            cache,
            storage,
            billing,
            service,
        }
    }

    pub fn add_project(&self, project: Project) -> Project {
        self.db.projects.lock().unwrap().push(project.clone());
        project
    }

    pub fn add_domain(&self, slug: &str, project_id: &str) {
        self.db
            .domains
            .lock()
            .unwrap()
            .push(Domain::new(slug, project_id));
    }

    pub fn add_link(&self, link: StoredLink) {
        self.db.links.lock().unwrap().push(link);
    }
}
