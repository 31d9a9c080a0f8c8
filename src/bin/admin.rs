//! CLI administration tool for link-resolver.
//!
//! Creates links, inspects their statistics and converts between keys and
//! tokens without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL
//! cargo run --bin admin -- shorten example.com/page
//!
//! # Show destination and views of a token
//! cargo run --bin admin -- stats ba
//!
//! # Convert between keys and tokens (no database needed)
//! cargo run --bin admin -- encode 62
//! cargo run --bin admin -- decode ba
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required for `shorten`, `stats` and `db`): PostgreSQL connection string

use link_resolver::application::services::LinkService;
use link_resolver::domain::repositories::LinkRepository;
use link_resolver::infrastructure::persistence::PgLinkRepository;
use link_resolver::utils::token_codec::TokenCodec;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing link-resolver.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Create a short link
    Shorten {
        /// Destination URL; `http://` is added when no scheme is given
        url: String,
    },

    /// Show destination and view count of a token
    Stats {
        /// Token as it appears in the short URL
        token: String,
    },

    /// Print the token for a storage key
    Encode {
        key: u64,
    },

    /// Print the storage key of a token
    Decode {
        token: String,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show number of stored links
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let codec = TokenCodec::default();

    match cli.command {
        Commands::Encode { key } => {
            println!("{}", codec.encode(key).bright_green().bold());
        }
        Commands::Decode { token } => {
            let key = codec
                .decode(&token)
                .with_context(|| format!("'{token}' is not a valid token"))?;
            println!("{}", key.to_string().bright_green().bold());
        }
        Commands::Shorten { url } => {
            let service = link_service(codec).await?;
            shorten(&service, &url).await?;
        }
        Commands::Stats { token } => {
            let service = link_service(codec).await?;
            stats(&service, &token).await?;
        }
        Commands::Db { action } => {
            let pool = connect().await?;
            handle_db_action(action, &pool).await?;
        }
    }

    Ok(())
}

async fn connect() -> Result<PgPool> {
    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")
}

async fn link_service(codec: TokenCodec) -> Result<LinkService<PgLinkRepository>> {
    let pool = connect().await?;
    let base_url =
        std::env::var("BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());

    Ok(LinkService::new(
        Arc::new(PgLinkRepository::new(Arc::new(pool))),
        codec,
        base_url,
    ))
}

async fn shorten(service: &LinkService<PgLinkRepository>, url: &str) -> Result<()> {
    let link = service
        .create_link(url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create link: {}", e))?;

    let token = service.token(link.key);

    println!("{}", "Link created".green().bold());
    println!();
    println!("  Destination: {}", link.destination.cyan());
    println!("  Key:         {}", link.key.to_string().bright_black());
    println!("  Token:       {}", token.bright_yellow().bold());
    println!("  Short URL:   {}", service.short_url(&token).bright_white());
    println!();

    Ok(())
}

async fn stats(service: &LinkService<PgLinkRepository>, token: &str) -> Result<()> {
    let link = service
        .get_stats(token)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    println!("  Link:  {}", link.destination.cyan());
    println!("  Views: {}", link.views.to_string().bright_green().bold());

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "Database connection OK".green().bold());
        }
        DbAction::Info => {
            let repo = PgLinkRepository::new(Arc::new(pool.clone()));
            let links_count = repo
                .count()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to count links: {}", e))?;
            let total_views: i64 =
                sqlx::query_scalar("SELECT COALESCE(SUM(views), 0)::BIGINT FROM links")
                    .fetch_one(pool)
                    .await?;

            println!(
                "  Links: {}",
                links_count.to_string().bright_green().bold()
            );
            println!(
                "  Views: {}",
                total_views.to_string().bright_green().bold()
            );
        }
    }

    Ok(())
}
