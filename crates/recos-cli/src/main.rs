//! Recos CLI - Command-line front end for product discovery

mod render;
mod shell;

use std::sync::Arc;

use anyhow::{Context, Result};
use recos_client::{CatalogApi, CatalogClient};
use recos_core::ItemId;
use recos_session::SessionConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("recos=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_help();
        return Ok(());
    }

    let command = &args[1];

    match command.as_str() {
        "help" | "--help" | "-h" => print_help(),
        "shell" => run_shell().await?,
        "search" => {
            if args.len() < 3 {
                eprintln!("Usage: recos search <query>");
                return Ok(());
            }
            search(&args[2..].join(" ")).await?;
        }
        "recommend" => {
            if args.len() < 3 {
                eprintln!("Usage: recos recommend <item-id>");
                return Ok(());
            }
            recommend(&args[2]).await?;
        }
        "generate" => {
            if args.len() < 3 {
                eprintln!("Usage: recos generate <item-id>");
                return Ok(());
            }
            generate(&args[2]).await?;
        }
        "analytics" => analytics().await?,
        "health" => health().await?,
        "classify" => {
            if args.len() < 3 {
                eprintln!("Usage: recos classify <image-url>");
                return Ok(());
            }
            classify(&args[2]).await?;
        }
        _ => {
            eprintln!("Unknown command: {}", command);
            print_help();
        }
    }

    Ok(())
}

fn print_help() {
    println!(
        r#"Recos CLI - Prompt to recommendations

USAGE:
    recos <COMMAND> [ARGS]

COMMANDS:
    help            Show this help message
    shell           Start an interactive discovery session
    search          Search the catalog with a free-text prompt
    recommend       List items related to an item
    generate        Generate a description for an item
    analytics       Show category counts and price statistics
    health          Check that the backend is up
    classify        Predict a category for an image URL

ENVIRONMENT:
    RECOS_API               Backend base URL (default http://localhost:8000)
    RECOS_TIMEOUT_SECS      Per-request timeout, 0 disables (default 30)
    RECOS_QUERY             Initial shell query (default "modern wooden chair")
    RECOS_SEARCH_LIMIT      Results per search (default 12)
    RECOS_RECOMMEND_LIMIT   Recommendations per item (default 6)

EXAMPLES:
    recos search modern wooden chair
    recos recommend 3f2a9c
    recos analytics
    RECOS_API=https://recos.example.com recos shell
"#
    );
}

async fn run_shell() -> Result<()> {
    let client = connect()?;
    let config = SessionConfig::from_env()?;

    tokio::task::spawn_blocking(move || shell::run(Arc::new(client), config))
        .await
        .context("interactive session panicked")??;
    Ok(())
}

async fn search(query: &str) -> Result<()> {
    let client = connect()?;
    let config = SessionConfig::from_env()?;
    let results = client.search(query, config.search_limit).await?;
    render::print_cards(&results);
    Ok(())
}

async fn recommend(id: &str) -> Result<()> {
    let client = connect()?;
    let config = SessionConfig::from_env()?;
    let item_id = ItemId::parse(id)?;
    let recommended = client.recommend(&item_id, config.recommend_limit).await?;
    render::print_cards(&recommended);
    Ok(())
}

async fn generate(id: &str) -> Result<()> {
    let client = connect()?;
    let item_id = ItemId::parse(id)?;
    let text = client.generate(&item_id).await?;
    if text.is_empty() {
        println!("(no description)");
    } else {
        println!("{}", text);
    }
    Ok(())
}

async fn analytics() -> Result<()> {
    let client = connect()?;
    let summary = client.analytics_summary().await?;
    render::print_histogram(&summary.category_counts);
    if let Some(stats) = &summary.price_stats {
        render::print_price_stats(stats);
    }
    Ok(())
}

async fn health() -> Result<()> {
    let client = connect()?;
    let status = client.health().await?;
    if !status.is_ok() {
        tracing::warn!("Backend reported status {:?}", status.status);
    }
    println!("{} - {} ({})", client.base_url(), status.status, status.message);
    Ok(())
}

async fn classify(image_url: &str) -> Result<()> {
    let client = connect()?;
    let category = client.classify(image_url).await?;
    println!("{}", category);
    Ok(())
}

fn connect() -> Result<CatalogClient> {
    let client = CatalogClient::from_env()?;
    tracing::debug!("Using backend at {}", client.base_url());
    Ok(client)
}
