//! Repository tests against a real PostgreSQL database.
//!
//! Run with `DATABASE_URL` pointing at a server the tests may create
//! databases on: `cargo test --test repository_postgres -- --ignored`.

use sqlx::PgPool;
use std::sync::Arc;

use project_teardown::domain::entities::LinkOwner;
use project_teardown::domain::repositories::{DomainRepository, LinkRepository, ProjectRepository};
use project_teardown::error::AppError;
use project_teardown::infrastructure::persistence::{
    PgDomainRepository, PgLinkRepository, PgProjectRepository,
};

async fn create_project(pool: &PgPool, id: &str, slug: &str) {
    sqlx::query("INSERT INTO projects (id, slug) VALUES ($1, $2)")
        .bind(id)
        .bind(slug)
        .execute(pool)
        .await
        .unwrap();
}

async fn create_domain(pool: &PgPool, slug: &str, project_id: &str) {
    sqlx::query("INSERT INTO domains (slug, project_id) VALUES ($1, $2)")
        .bind(slug)
        .bind(project_id)
        .execute(pool)
        .await
        .unwrap();
}

async fn create_link(pool: &PgPool, domain: &str, key: &str, proxy: bool, project_id: &str) {
    sqlx::query(
        "INSERT INTO links (domain, key, url, proxy, user_id, project_id) VALUES ($1, $2, 'https://example.com', $3, 'u1', $4)",
    )
    .bind(domain)
    .bind(key)
    .bind(proxy)
    .bind(project_id)
    .execute(pool)
    .await
    .unwrap();
}

async fn count(pool: &PgPool, sql: &str) -> i64 {
    sqlx::query_scalar(sql).fetch_one(pool).await.unwrap()
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_delete_project_cascades(pool: PgPool) {
    create_project(&pool, "p1", "acme").await;
    create_domain(&pool, "d1.com", "p1").await;
    create_link(&pool, "dub.sh", "abc", false, "p1").await;

    let repo = PgProjectRepository::new(Arc::new(pool.clone()));
    repo.delete_by_slug("acme").await.unwrap();

    assert_eq!(count(&pool, "SELECT COUNT(*) FROM projects").await, 0);
    assert_eq!(count(&pool, "SELECT COUNT(*) FROM domains").await, 0);
    assert_eq!(count(&pool, "SELECT COUNT(*) FROM links").await, 0);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_delete_missing_project_is_not_found(pool: PgPool) {
    let repo = PgProjectRepository::new(Arc::new(pool));

    let result = repo.delete_by_slug("ghost").await;

    assert!(matches!(result, Err(AppError::NotFound { .. })));
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_find_project_by_slug(pool: PgPool) {
    create_project(&pool, "p1", "acme").await;
    let repo = PgProjectRepository::new(Arc::new(pool));

    let project = repo.find_by_slug("acme").await.unwrap().unwrap();

    assert_eq!(project.id, "p1");
    assert!(project.stripe_id.is_none());
    assert!(repo.find_by_slug("nope").await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_find_domains_by_project(pool: PgPool) {
    create_project(&pool, "p1", "acme").await;
    create_project(&pool, "p2", "other").await;
    create_domain(&pool, "b.com", "p1").await;
    create_domain(&pool, "a.com", "p1").await;
    create_domain(&pool, "c.com", "p2").await;

    let repo = PgDomainRepository::new(Arc::new(pool));
    let slugs: Vec<String> = repo
        .find_by_project("p1")
        .await
        .unwrap()
        .into_iter()
        .map(|d| d.slug)
        .collect();

    assert_eq!(slugs, vec!["a.com".to_string(), "b.com".to_string()]);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_delete_domain_removes_its_links(pool: PgPool) {
    create_project(&pool, "p1", "acme").await;
    create_domain(&pool, "d1.com", "p1").await;
    create_link(&pool, "d1.com", "one", true, "p1").await;
    create_link(&pool, "dub.sh", "two", false, "p1").await;

    let repo = PgDomainRepository::new(Arc::new(pool.clone()));
    repo.delete_by_slug("d1.com").await.unwrap();

    assert_eq!(count(&pool, "SELECT COUNT(*) FROM domains").await, 0);
    assert_eq!(count(&pool, "SELECT COUNT(*) FROM links").await, 1);

    let missing = repo.delete_by_slug("d1.com").await;
    assert!(matches!(missing, Err(AppError::NotFound { .. })));
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_default_domain_links_are_filtered(pool: PgPool) {
    create_project(&pool, "p1", "acme").await;
    create_link(&pool, "dub.sh", "AbC", true, "p1").await;
    create_link(&pool, "chatg.pt", "x", false, "p1").await;
    create_link(&pool, "custom.com", "y", false, "p1").await;

    let repo = PgLinkRepository::new(Arc::new(pool));
    let defaults = vec!["dub.sh".to_string(), "chatg.pt".to_string()];

    let mut links = repo.find_default_domain_links("p1", &defaults).await.unwrap();
    links.sort_by(|a, b| a.domain.cmp(&b.domain));

    assert_eq!(links.len(), 2);
    assert_eq!(links[1].domain, "dub.sh");
    assert_eq!(links[1].key, "AbC");
    assert!(links[1].proxy);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_reassign_moves_links_out_of_cascade(pool: PgPool) {
    create_project(&pool, "p1", "acme").await;
    create_project(&pool, "legal", "legal").await;
    create_link(&pool, "dub.sh", "a", false, "p1").await;
    create_link(&pool, "dub.sh", "b", true, "p1").await;
    create_link(&pool, "custom.com", "c", false, "p1").await;

    let links = PgLinkRepository::new(Arc::new(pool.clone()));
    let updated = links
        .reassign_default_domain_links(
            "p1",
            &["dub.sh".to_string()],
            &LinkOwner::new("legal-user", "legal"),
        )
        .await
        .unwrap();
    assert_eq!(updated, 2);

    PgProjectRepository::new(Arc::new(pool.clone()))
        .delete_by_slug("acme")
        .await
        .unwrap();

    assert_eq!(
        count(&pool, "SELECT COUNT(*) FROM links WHERE project_id = 'legal' AND user_id = 'legal-user'").await,
        2
    );
    assert_eq!(count(&pool, "SELECT COUNT(*) FROM links").await, 2);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_default_domain_match_ignores_case(pool: PgPool) {
    create_project(&pool, "p1", "acme").await;
    create_project(&pool, "legal", "legal").await;
    create_link(&pool, "Dub.SH", "AbC", true, "p1").await;

    let repo = PgLinkRepository::new(Arc::new(pool.clone()));
    let defaults = vec!["dub.sh".to_string()];

    let links = repo.find_default_domain_links("p1", &defaults).await.unwrap();
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].domain, "Dub.SH");

    let updated = repo
        .reassign_default_domain_links("p1", &defaults, &LinkOwner::new("legal-user", "legal"))
        .await
        .unwrap();
    assert_eq!(updated, 1);
}
