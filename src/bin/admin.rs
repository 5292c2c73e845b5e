//! CLI administration tool for hasura-shortener.
//!
//! Talks to the same store as the HTTP service, without going through HTTP.
//!
//! # Usage
//!
//! ```bash
//! # Check store connectivity
//! cargo run --bin admin -- check
//!
//! # Resolve a slug
//! cargo run --bin admin -- resolve custom1
//!
//! # Create a short link
//! cargo run --bin admin -- create https://x.test --slug custom1
//! ```
//!
//! # Environment Variables
//!
//! Same as the server: `HASURA_ENDPOINT`, `ADMIN_SECRET`, `STORE_BACKEND`, ...

use hasura_shortener::application::services::{CreateOutcome, LinkService};
use hasura_shortener::config;
use hasura_shortener::error::AppError;
use hasura_shortener::server::build_repository;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;

/// CLI tool for managing hasura-shortener links.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check store connection
    Check,

    /// Resolve a slug to its URL
    Resolve {
        /// Slug to look up
        slug: String,
    },

    /// Create a short link
    Create {
        /// URL to shorten
        url: String,

        /// Custom slug (optional, generated if not provided)
        #[arg(short, long)]
        slug: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;
    let repository = build_repository(&config)?;

    match cli.command {
        Commands::Check => {
            if repository.health_check().await {
                println!("{}", "Store reachable".green().bold());
            } else {
                println!("{}", "Store unreachable".red().bold());
                std::process::exit(1);
            }
        }
        Commands::Resolve { slug } => {
            let service = LinkService::new(repository);
            resolve(&service, &slug).await?;
        }
        Commands::Create { url, slug, yes } => {
            let service = LinkService::new(repository);
            create(&service, url, slug, yes).await?;
        }
    }

    Ok(())
}

async fn resolve(service: &LinkService, slug: &str) -> Result<()> {
    match service.resolve(slug).await {
        Ok(link) => {
            println!("  {} -> {}", link.slug.cyan(), link.full_url.bright_white());
            Ok(())
        }
        Err(AppError::NotFound { .. }) => {
            println!("{} {}", "Not found:".yellow(), slug);
            std::process::exit(1);
        }
        Err(e) => Err(anyhow::anyhow!("Failed to resolve slug: {}", e)),
    }
}

async fn create(
    service: &LinkService,
    url: String,
    slug: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "Create short link".bright_blue().bold());
    println!("  URL:  {}", url.cyan());
    println!(
        "  Slug: {}",
        slug.as_deref().unwrap_or("(generated)").bright_yellow()
    );
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this link?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    let created = service
        .create(url, slug)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create link: {}", e))?;

    match created.outcome {
        CreateOutcome::Created => println!("{}", "Slug created".green().bold()),
        CreateOutcome::Existing => println!("{}", "URL already shortened".yellow().bold()),
    }
    println!(
        "  {} -> {}",
        created.link.slug.cyan(),
        created.link.full_url.bright_white()
    );

    Ok(())
}
