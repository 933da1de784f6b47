//! Runtime setup: logging, database pool and backend wiring.

use anyhow::{Context, Result};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use crate::application::services::{Collaborators, DomainTeardownService, ProjectService};
use crate::config::Config;
use crate::infrastructure::billing::{BillingProvider, StripeBilling, UnconfiguredBilling};
use crate::infrastructure::cache::{CacheService, NullCache, RedisCache};
use crate::infrastructure::persistence::{
    PgDomainRepository, PgLinkRepository, PgProjectRepository,
};
use crate::infrastructure::storage::{ObjectStorage, ObjectStoreStorage};
use crate::state::AppState;

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` drives the filter; `LOG_FORMAT=json` switches to JSON lines.
pub fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    if config.log_format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

/// Opens the PostgreSQL pool using the configured pool settings.
///
/// # Errors
///
/// Returns an error if the database is unreachable.
pub async fn connect_pool(config: &Config) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.pool.max_connections)
        .acquire_timeout(Duration::from_secs(config.pool.acquire_timeout))
        .idle_timeout(Duration::from_secs(config.pool.idle_timeout))
        .max_lifetime(Duration::from_secs(config.pool.max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    tracing::info!("Connected to database");
    Ok(pool)
}

/// Connects every backend and builds the teardown services.
///
/// Redis is optional: when it is not configured or unreachable, cache cleanup
/// falls back to [`NullCache`]. Without a Stripe key, subscription
/// cancellation is rejected by [`UnconfiguredBilling`].
///
/// # Errors
///
/// Returns an error if the database is unreachable or the storage DSN is invalid.
pub async fn build_state(config: &Config) -> Result<AppState> {
    let pool = Arc::new(connect_pool(config).await?);

    let cache: Arc<dyn CacheService> = if let Some(redis_url) = &config.redis_url {
        match RedisCache::connect(redis_url).await {
            Ok(redis) => {
                tracing::info!("Cache enabled (Redis)");
                Arc::new(redis)
            }
            Err(e) => {
                tracing::warn!("Failed to connect to Redis: {}. Using NullCache.", e);
                Arc::new(NullCache::new())
            }
        }
    } else {
        tracing::info!("Cache disabled (NullCache)");
        Arc::new(NullCache::new())
    };

    let storage: Arc<dyn ObjectStorage> = Arc::new(
        ObjectStoreStorage::from_dsn(&config.storage_dsn)
            .context("Failed to configure object storage")?,
    );

    let billing: Arc<dyn BillingProvider> = match &config.stripe_secret_key {
        Some(key) => Arc::new(
            StripeBilling::new(&config.stripe_api_base, key)
                .context("Failed to configure Stripe client")?,
        ),
        None => Arc::new(UnconfiguredBilling::new()),
    };

    let project_repository = Arc::new(PgProjectRepository::new(pool.clone()));
    let domain_repository = Arc::new(PgDomainRepository::new(pool.clone()));
    let link_repository = Arc::new(PgLinkRepository::new(pool.clone()));

    let domain_teardown = Arc::new(DomainTeardownService::new(
        domain_repository.clone(),
        link_repository.clone(),
        cache.clone(),
        storage.clone(),
    ));

    let project_service = Arc::new(ProjectService::new(
        project_repository,
        domain_repository,
        link_repository,
        Collaborators {
            domain_teardown,
            cache,
            storage,
            billing,
        },
        config.teardown_settings(),
    ));

    Ok(AppState::new(pool, project_service))
}
