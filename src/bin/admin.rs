//! CLI administration tool for project teardown.
//!
//! # Usage
//!
//! ```bash
//! # Show a project
//! cargo run --bin admin -- project show acme
//!
//! # Delete a project and everything it owns
//! cargo run --bin admin -- project delete acme
//!
//! # Delete a project but retain its default-domain links for compliance
//! cargo run --bin admin -- project delete acme --admin
//!
//! # Check database connection / apply migrations
//! cargo run --bin admin -- db check
//! cargo run --bin admin -- db migrate
//! ```
//!
//! # Environment Variables
//!
//! See [`project_teardown::config`] for the full list. `.env` is loaded if present.

use project_teardown::application::outcome::{
    ActionOutcome, ActionValue, CleanupAction, Outcome, TeardownReport,
};
use project_teardown::bootstrap;
use project_teardown::config::{self, Config};
use project_teardown::domain::entities::Project;
use project_teardown::infrastructure::cache::{CacheService, RedisCache};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;

/// CLI tool for deleting projects across every backend.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Inspect and delete projects
    Project {
        #[command(subcommand)]
        action: ProjectAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Project subcommands.
#[derive(Subcommand)]
enum ProjectAction {
    /// Show a project
    Show {
        /// Project slug
        slug: String,
    },

    /// Delete a project with all its domains, links, images and subscription
    Delete {
        /// Project slug
        slug: String,

        /// Reassign default-domain links to the legal holding project instead of deleting them
        #[arg(long)]
        admin: bool,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,

        /// Print the teardown report as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database (and Redis, if configured) connections
    Check,

    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env().context("Invalid configuration")?;
    bootstrap::init_tracing(&config);
    config.print_summary();

    match cli.command {
        Commands::Project { action } => handle_project_action(action, &config).await?,
        Commands::Db { action } => handle_db_action(action, &config).await?,
    }

    Ok(())
}

/// Dispatches project commands.
async fn handle_project_action(action: ProjectAction, config: &Config) -> Result<()> {
    let state = bootstrap::build_state(config).await?;

    match action {
        ProjectAction::Show { slug } => {
            let project = state
                .project_service
                .get_project(&slug)
                .await
                .map_err(|e| anyhow::anyhow!("{}", e))?;
            print_project(&project);
        }
        ProjectAction::Delete {
            slug,
            admin,
            yes,
            json,
        } => {
            let project = state
                .project_service
                .get_project(&slug)
                .await
                .map_err(|e| anyhow::anyhow!("{}", e))?;

            print_project(&project);
            if admin {
                println!(
                    "{}",
                    format!(
                        "Default-domain links will be reassigned to project {}",
                        config.legal_project_id
                    )
                    .yellow()
                );
                println!();
            }

            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt(format!("Permanently delete project '{}'?", project.slug))
                    .default(false)
                    .interact()?;

                if !confirmed {
                    println!("{}", "❌ Cancelled".red());
                    return Ok(());
                }
            }

            let result = if admin {
                state.project_service.delete_project_admin(&project).await
            } else {
                state.project_service.delete_project(&project).await
            };

            let report = match result {
                Ok(report) => report,
                Err(e) => {
                    println!("{}", format!("❌ Project row was not deleted: {}", e).red().bold());
                    println!("{}", serde_json::to_string_pretty(e.details())?);
                    anyhow::bail!("Project deletion failed");
                }
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }

            let rejected = report.rejections().count();
            if rejected > 0 {
                anyhow::bail!("{} teardown actions were rejected", rejected);
            }
        }
    }

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, config: &Config) -> Result<()> {
    let pool = bootstrap::connect_pool(config).await?;

    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(&pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());

            if !config.is_cache_enabled() {
                println!("{}", "Cache: disabled".bright_black());
                return Ok(());
            }

            let redis_url = config.redis_url.as_deref().unwrap_or_default();
            let cache = RedisCache::connect(redis_url).await?;
            if cache.health_check().await {
                println!("{}", "✅ Redis connection OK".green().bold());
            } else {
                anyhow::bail!("Redis health check failed");
            }
        }
        DbAction::Migrate => {
            println!("{}", "📦 Applying migrations...".bright_blue());

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to migrate")?;

            println!("{}", "✅ Migrations applied".green().bold());
        }
    }

    Ok(())
}

fn print_project(project: &Project) {
    println!("{}", "📁 Project".bright_blue().bold());
    println!("  ID:           {}", project.id.bright_black());
    println!("  Slug:         {}", project.slug.cyan());
    println!(
        "  Subscription: {}",
        project.stripe_id.as_deref().unwrap_or("-").bright_white()
    );
    println!(
        "  Logo:         {}",
        project.logo.as_deref().unwrap_or("-").bright_white()
    );
    println!();
}

/// Prints both outcome lists.
///
/// # Output Format
///
/// ```text
/// Cleanup
///   ✓ domain_teardown     d1
///   ✓ cache_removal       dub.sh (2 keys)
///   ✗ image_deletion      dub.sh/AbC: Object storage error ...
/// ```
fn print_report(report: &TeardownReport) {
    println!("{}", "Cleanup".bright_white().bold());
    if report.cleanup_outcomes.is_empty() {
        println!("  {}", "nothing to clean up".bright_black());
    }
    for outcome in &report.cleanup_outcomes {
        print_outcome(outcome);
    }
    println!();

    println!("{}", "Teardown".bright_white().bold());
    for outcome in &report.teardown_outcomes {
        print_outcome(outcome);
    }
    println!();

    if report.is_clean() {
        println!("{}", "✅ Project deleted".green().bold());
    } else {
        println!(
            "{}",
            "⚠️  Project deleted, but some resources may be orphaned"
                .yellow()
                .bold()
        );
    }
}

fn print_outcome(outcome: &ActionOutcome) {
    let target = describe_target(&outcome.action);

    match &outcome.outcome {
        Outcome::Fulfilled { value } => {
            let suffix = match value {
                ActionValue::Skipped => " (skipped)".bright_black().to_string(),
                ActionValue::Removed(n) => format!(" ({} removed)", n).bright_black().to_string(),
                _ => String::new(),
            };
            println!(
                "  {} {:<26} {}{}",
                "✓".green(),
                outcome.action.label(),
                target,
                suffix
            );
        }
        Outcome::Rejected { reason } => {
            println!(
                "  {} {:<26} {}: {}",
                "✗".red().bold(),
                outcome.action.label(),
                target,
                reason.red()
            );
        }
    }
}

fn describe_target(action: &CleanupAction) -> String {
    match action {
        CleanupAction::DomainTeardown { slug } | CleanupAction::ProjectDeletion { slug } => {
            slug.clone()
        }
        CleanupAction::CacheRemoval { domain, keys } => format!("{} ({} keys)", domain, keys.len()),
        CleanupAction::ImageDeletion { key } => key.clone(),
        CleanupAction::LogoDeletion { key } => key.clone().unwrap_or_else(|| "-".to_string()),
        CleanupAction::SubscriptionCancellation { subscription_id } => {
            subscription_id.clone().unwrap_or_else(|| "-".to_string())
        }
    }
}
