//! SoftVet CLI
//!
//! Command-line interface running the assessment pipeline in-process; no
//! server needed.

#![allow(clippy::print_stdout)]

mod output;

use std::sync::Arc;

use anyhow::Context;
use application::AssessmentService;
use clap::{Parser, Subcommand};
use domain::CacheKey;
use infrastructure::{
    telemetry, AppConfig, CacheManager, GeminiInferenceAdapter, KevCatalogAdapter,
    VendorSourceAdapter,
};

use crate::output::OutputFormat;

/// SoftVet CLI
#[derive(Parser)]
#[command(name = "softvet")]
#[command(author, version, about = "Software security research tool", long_about = None)]
struct Cli {
    /// Verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assess a software product, vendor, or URL
    Assess {
        /// Product name, vendor name, or URL
        target: String,

        /// Skip the cache and assess fresh
        #[arg(short, long)]
        refresh: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Assess two products and compare them side by side
    Compare {
        /// First product
        target_a: String,

        /// Second product
        target_b: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Inspect and manage the assessment cache
    Cache {
        #[command(subcommand)]
        command: CacheCommands,
    },

    /// Show backend configuration and storage status
    Status,
}

#[derive(Subcommand)]
enum CacheCommands {
    /// List cached assessments with age and staleness
    List,

    /// Print the raw cached record for a key
    Show {
        /// 16-hex-character cache key
        key: String,
    },

    /// Delete one cached assessment
    Delete {
        /// 16-hex-character cache key
        key: String,
    },

    /// Delete every cached assessment
    Clear {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    telemetry::init_tracing(telemetry::verbosity_directive(cli.verbose));

    let config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config, using defaults: {e}");
        AppConfig::default()
    });
    let service = build_service(&config)?;

    match cli.command {
        Commands::Assess {
            target,
            refresh,
            format,
        } => {
            let outcome = service
                .assess(&target, refresh)
                .await
                .context("assessment failed")?;
            println!("{}", output::render_assessment(&outcome, format)?);
        },

        Commands::Compare {
            target_a,
            target_b,
            format,
        } => {
            let outcome = service
                .compare(&target_a, &target_b)
                .await
                .context("comparison failed")?;
            println!("{}", output::render_comparison(&outcome, format)?);
        },

        Commands::Cache { command } => run_cache_command(&service, command).await?,

        Commands::Status => {
            let info = service.storage_info();
            println!("SoftVet v{}", env!("CARGO_PKG_VERSION"));
            println!("Model: {}", service.current_model());
            println!("Storage backend: {} ({})", info.backend, info.location);
            if let Some(reason) = &info.fallback_reason {
                println!("Remote fallback: {reason}");
            }
            println!("Cache TTL: {} days", service.ttl_days());
        },
    }

    Ok(())
}

async fn run_cache_command(
    service: &AssessmentService,
    command: CacheCommands,
) -> anyhow::Result<()> {
    match command {
        CacheCommands::List => {
            let entries = service.list_cached().await?;
            print!("{}", output::render_cache_listing(&entries, service.ttl_days()));
        },

        CacheCommands::Show { key } => {
            let key = CacheKey::parse(&key).context("invalid cache key")?;
            match service.cached_record(&key).await? {
                Some(record) => println!("{}", serde_json::to_string_pretty(&record)?),
                None => anyhow::bail!("no cached assessment for key {key}"),
            }
        },

        CacheCommands::Delete { key } => {
            let key = CacheKey::parse(&key).context("invalid cache key")?;
            if service.delete_cached(&key).await? {
                println!("Deleted {key}");
            } else {
                println!("Nothing cached under {key}");
            }
        },

        CacheCommands::Clear { yes } => {
            if !yes {
                anyhow::bail!("pass --yes to clear the entire cache");
            }
            let cleared = service.clear_cache().await?;
            println!("Cleared {cleared} cached assessment(s)");
        },
    }

    Ok(())
}

/// Wire the in-process assessment pipeline from configuration
fn build_service(config: &AppConfig) -> anyhow::Result<AssessmentService> {
    let inference = GeminiInferenceAdapter::new(config.inference.clone())?;
    let sources = VendorSourceAdapter::with_config(config.sources.probe_config())?;
    let kev = KevCatalogAdapter::with_config(config.sources.kev_config())?;
    let store = CacheManager::from_settings(&config.storage);

    Ok(AssessmentService::new(
        Arc::new(inference),
        Arc::new(sources),
        Arc::new(kev),
        Arc::new(store),
        config.storage.ttl_days,
    ))
}
