//! CLI administration tool for kv-shortener.
//!
//! Talks to the store directly, so it works while the HTTP server is down.
//!
//! # Usage
//!
//! ```bash
//! # Statistics for every slug
//! cargo run --bin admin -- stats
//!
//! # Allocate a slug
//! cargo run --bin admin -- shorten https://example.com --slug promo
//!
//! # Inspect a slug without counting a click
//! cargo run --bin admin -- lookup promo
//!
//! # Find stats records that lost their TTL, and restore it
//! cargo run --bin admin -- audit --fix
//!
//! # Check store connection
//! cargo run --bin admin -- check
//! ```
//!
//! Reads the same environment variables as the server (see `kv_shortener::config`).

use kv_shortener::application::services::{LinkService, LinkSettings, StatsService};
use kv_shortener::config::{self, Config};
use kv_shortener::domain::errors::ShortenError;
use kv_shortener::domain::repositories::{KeyExpiry, LinkStore};
use kv_shortener::server::connect_store;

use anyhow::{Context, Result};
use chrono::DateTime;
use clap::{Parser, Subcommand};
use colored::*;
use std::sync::Arc;
use std::time::Duration;

/// CLI tool for managing kv-shortener.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show statistics for every slug
    Stats,

    /// Allocate a short link
    Shorten {
        /// Destination URL
        url: String,

        /// Desired slug (random if omitted)
        #[arg(short, long)]
        slug: Option<String>,
    },

    /// Show the URL and statistics of a slug without counting a click
    Lookup { slug: String },

    /// Find stats records without an expiry
    Audit {
        /// Restore the configured stats TTL on every record found
        #[arg(long)]
        fix: bool,
    },

    /// Check store connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env().context("Invalid configuration")?;
    let store = connect_store(&config).await?;

    match cli.command {
        Commands::Stats => handle_stats(store, &config).await?,
        Commands::Shorten { url, slug } => handle_shorten(store, &config, url, slug).await?,
        Commands::Lookup { slug } => handle_lookup(store, &config, slug).await?,
        Commands::Audit { fix } => handle_audit(store, &config, fix).await?,
        Commands::Check => handle_check(store).await?,
    }

    Ok(())
}

fn format_timestamp(ts: i64) -> String {
    DateTime::from_timestamp(ts, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Lists every stats record, most clicked first.
///
/// ```text
/// 📊 Statistics
///
///   Slug                 Clicks     Last access        URL
///   ──────────────────────────────────────────────────────────────────────
///   promo                42         2024-01-16 14:20   https://example.com
/// ```
async fn handle_stats(store: Arc<dyn LinkStore>, config: &Config) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let service = StatsService::new(store, config.base_url.clone());
    let mut summaries = service
        .list_all()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to scan stats: {}", e))?;

    if summaries.is_empty() {
        println!("{}", "  No stats records found".yellow());
        return Ok(());
    }

    summaries.sort_by(|a, b| b.click_count.cmp(&a.click_count));

    println!(
        "  {:<20} {:<10} {:<18} {}",
        "Slug".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Last access".bright_white().bold(),
        "URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for s in &summaries {
        println!(
            "  {:<20} {:<10} {:<18} {}",
            s.slug.cyan(),
            s.click_count.to_string().bright_white(),
            format_timestamp(s.last_accessed).bright_black(),
            s.original_url
        );
    }

    let total_clicks: i64 = summaries.iter().map(|s| s.click_count).sum();

    println!();
    println!(
        "  Slugs: {}  Clicks: {}",
        summaries.len().to_string().bright_white().bold(),
        total_clicks.to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

async fn handle_shorten(
    store: Arc<dyn LinkStore>,
    config: &Config,
    url: String,
    slug: Option<String>,
) -> Result<()> {
    let service = LinkService::new(store, LinkSettings::from(config));

    match service.allocate(&url, slug.as_deref()).await {
        Ok(link) => {
            println!("{}", "✅ Short link created".green().bold());
            println!();
            println!("  Short URL: {}", link.short_url.bright_yellow().bold());
            println!("  Slug:      {}", link.slug.cyan());
            println!("  Target:    {}", link.original_url);
            println!(
                "  Expires:   {}",
                format_timestamp(link.expires_at).bright_black()
            );
            println!();
            Ok(())
        }
        Err(e) if e.is_client_error() => {
            println!("{} {}", "❌".red(), e.to_string().red());
            std::process::exit(1);
        }
        Err(e) => Err(anyhow::anyhow!("Failed to create short link: {}", e)),
    }
}

async fn handle_lookup(store: Arc<dyn LinkStore>, config: &Config, slug: String) -> Result<()> {
    println!("{} {}", "🔍 Lookup".bright_blue().bold(), slug.cyan());
    println!();

    let url = store
        .get_url(&slug)
        .await
        .map_err(|e| anyhow::anyhow!("Store error: {}", e))?;

    match url {
        Some(url) => println!("  URL record:   {}", url.green()),
        None => println!("  URL record:   {}", "missing or expired".yellow()),
    }

    let service = StatsService::new(store.clone(), config.base_url.clone());
    match service.get(&slug).await {
        Ok(summary) => {
            println!("  Clicks:       {}", summary.click_count.to_string().bold());
            println!("  Created:      {}", format_timestamp(summary.created_at));
            println!("  Last access:  {}", format_timestamp(summary.last_accessed));
        }
        Err(ShortenError::NotFound(_)) => {
            println!("  Stats record: {}", "missing or expired".yellow());
        }
        Err(e) => return Err(anyhow::anyhow!("Store error: {}", e)),
    }

    let expiry = store
        .stats_expiry(&slug)
        .await
        .map_err(|e| anyhow::anyhow!("Store error: {}", e))?;
    if expiry == KeyExpiry::Persistent {
        println!(
            "  {}",
            "⚠️  Stats record has no expiry (run `admin audit --fix`)".yellow()
        );
    }
    println!();

    Ok(())
}

/// Reports stats records left without a TTL.
///
/// A stats record loses its TTL when the expiry step of a stats write fails,
/// or when a click is counted after the record itself expired. Such records
/// would otherwise live forever.
async fn handle_audit(store: Arc<dyn LinkStore>, config: &Config, fix: bool) -> Result<()> {
    println!("{}", "🩺 Stats TTL audit".bright_blue().bold());
    println!();

    let scanned = store
        .scan_stats()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to scan stats: {}", e))?;

    let ttl = Duration::from_secs(config.stats_ttl_seconds);
    let mut persistent = 0usize;
    let mut repaired = 0usize;

    for entry in &scanned {
        let expiry = store
            .stats_expiry(&entry.slug)
            .await
            .map_err(|e| anyhow::anyhow!("Store error on '{}': {}", entry.slug, e))?;

        if expiry != KeyExpiry::Persistent {
            continue;
        }

        persistent += 1;
        if fix {
            let applied = store
                .expire_stats(&entry.slug, ttl)
                .await
                .map_err(|e| anyhow::anyhow!("Store error on '{}': {}", entry.slug, e))?;
            if applied {
                repaired += 1;
                println!("  {} {}", "fixed".green(), entry.slug.cyan());
            }
        } else {
            println!("  {} {}", "no ttl".yellow(), entry.slug.cyan());
        }
    }

    println!();
    println!(
        "  Scanned: {}  Without TTL: {}",
        scanned.len().to_string().bright_white().bold(),
        persistent.to_string().bright_white().bold()
    );
    if fix {
        println!(
            "  Restored TTL ({}s) on {} record(s)",
            config.stats_ttl_seconds,
            repaired.to_string().green().bold()
        );
    } else if persistent > 0 {
        println!("  Re-run with {} to restore the TTL", "--fix".bright_cyan());
    }
    println!();

    Ok(())
}

async fn handle_check(store: Arc<dyn LinkStore>) -> Result<()> {
    println!("{}", "🔍 Checking store connection...".bright_blue());

    match store.ping().await {
        Ok(()) => {
            println!("{}", "✅ Store connection OK".green().bold());
            Ok(())
        }
        Err(e) => {
            println!("{}", "❌ Store connection failed".red().bold());
            Err(anyhow::anyhow!("{}", e))
        }
    }
}
