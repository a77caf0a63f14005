mod cli;
mod config;
mod errors;
mod llm_client;
mod pipeline;
mod report;
mod scoring;
mod scraper;

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::Args;
use crate::config::{Config, SearchConfig};
use crate::llm_client::LlmClient;
use crate::pipeline::RunOptions;
use crate::scoring::LlmJobScorer;
use crate::scraper::ScrapeClient;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load credentials first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    let filter = if args.quiet {
        EnvFilter::new(format!("{}=warn", env!("CARGO_PKG_NAME")))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        })
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Scout v{}", env!("CARGO_PKG_VERSION"));

    // Load and validate the search config file
    let search = SearchConfig::load(&args.config)?;

    // Initialize API clients
    let scraper = ScrapeClient::new(config.bright_data_api_key.clone());
    let llm = LlmClient::new(config.anthropic_api_key.clone());
    info!("LLM client initialized (model: {})", llm_client::MODEL);
    let scorer = LlmJobScorer(llm);

    let options = RunOptions {
        jobs_number: args.jobs_number,
        batch_size: args.batch_size,
        poll_interval: Duration::from_secs(args.poll_interval_secs),
        output: args.output.clone(),
        top: args.top,
    };

    pipeline::run(&scraper, &scorer, &search, &options).await?;

    Ok(())
}
