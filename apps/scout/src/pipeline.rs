//! Run orchestration, the straight-line pipeline invoked once per run.
//!
//! Flow: trigger scrape → poll snapshot → batch score → merge + sort →
//! CSV export → top-N summary.

use std::path::PathBuf;
use std::time::Duration;

use tracing::info;

use crate::config::SearchConfig;
use crate::errors::AppError;
use crate::report;
use crate::scoring::{self, JobScorer};
use crate::scraper::ScrapeClient;

/// Runtime knobs carried from the CLI into the run.
pub struct RunOptions {
    pub jobs_number: u32,
    pub batch_size: usize,
    pub poll_interval: Duration,
    pub output: PathBuf,
    pub top: usize,
}

/// Runs the full search-score-export pipeline once.
pub async fn run(
    scraper: &ScrapeClient,
    scorer: &dyn JobScorer,
    config: &SearchConfig,
    options: &RunOptions,
) -> Result<(), AppError> {
    // Step 1: trigger the scrape
    let snapshot_id = scraper.trigger_search(config, options.jobs_number).await?;
    info!("Job search triggered, snapshot id: {snapshot_id}");

    // Step 2: poll until the snapshot is ready
    let listings = scraper
        .poll_snapshot(&snapshot_id, options.poll_interval)
        .await?;
    info!("{} jobs found", listings.len());

    // Step 3: score in batches
    let scores = scoring::score_all(
        scorer,
        &listings,
        options.batch_size,
        &config.profile_summary,
        &config.desired_job_summary,
    )
    .await?;
    info!("{} scores returned", scores.len());

    // Step 4: merge scores onto listings and rank
    let ranked = report::merge_scores(&listings, scores);

    // Step 5: export to CSV
    let written = report::export_csv(&ranked, &options.output)?;
    if written > 0 {
        println!("Exported {} jobs to {}", written, options.output.display());
    }

    // Step 6: print the top matches for quick review
    report::print_top(&ranked, options.top);

    Ok(())
}
