//! Batch scoring: slices the listing set into fixed-size chunks and asks
//! the LLM to score each chunk against the candidate profile.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::scraper::JobListing;

pub mod prompts;

use crate::scoring::prompts::{SCORING_PROMPT_TEMPLATE, SCORING_SYSTEM};

/// Fixed delay between scoring batches to keep request volume polite.
const BATCH_DELAY: Duration = Duration::from_secs(1);

/// Score and rationale for a single job posting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobScore {
    pub job_posting_id: String,
    pub score: u8,
    pub comment: String,
}

/// Wire shape of the scoring reply: `{ "scores": [...] }`.
#[derive(Debug, Deserialize)]
struct ScoresResponse {
    scores: Vec<JobScore>,
}

/// The scoring backend seam. The shipped backend calls the LLM; tests
/// substitute a deterministic implementation.
#[async_trait]
pub trait JobScorer: Send + Sync {
    async fn score_batch(
        &self,
        batch: &[JobListing],
        profile_summary: &str,
        desired_job_summary: &str,
    ) -> Result<Vec<JobScore>, AppError>;
}

/// Scores job batches via the LLM client in JSON mode.
pub struct LlmJobScorer(pub LlmClient);

#[async_trait]
impl JobScorer for LlmJobScorer {
    async fn score_batch(
        &self,
        batch: &[JobListing],
        profile_summary: &str,
        desired_job_summary: &str,
    ) -> Result<Vec<JobScore>, AppError> {
        let jobs_json = serde_json::to_string(batch)
            .map_err(|e| AppError::Scoring(format!("failed to serialize job batch: {e}")))?;

        let prompt = SCORING_PROMPT_TEMPLATE
            .replace("{profile_summary}", profile_summary)
            .replace("{desired_job_summary}", desired_job_summary)
            .replace("{jobs_json}", &jobs_json);

        let response: ScoresResponse = self.0.complete_json(&prompt, SCORING_SYSTEM).await?;

        validate_scores(&response.scores)?;
        Ok(response.scores)
    }
}

/// A score above 100 fails the run. Negative values are already
/// unrepresentable in the deserialized integer type.
fn validate_scores(scores: &[JobScore]) -> Result<(), AppError> {
    for score in scores {
        if score.score > 100 {
            return Err(AppError::Scoring(format!(
                "score {} for job '{}' is outside the 0-100 range",
                score.score, score.job_posting_id
            )));
        }
    }
    Ok(())
}

/// Scores all listings in consecutive batches and returns the combined
/// score list in batch order.
pub async fn score_all(
    scorer: &dyn JobScorer,
    listings: &[JobListing],
    batch_size: usize,
    profile_summary: &str,
    desired_job_summary: &str,
) -> Result<Vec<JobScore>, AppError> {
    if batch_size == 0 {
        return Err(AppError::Scoring("batch size must be at least 1".to_string()));
    }

    let total_batches = (listings.len() + batch_size - 1) / batch_size;
    let mut all_scores = Vec::with_capacity(listings.len());

    for (i, batch) in listings.chunks(batch_size).enumerate() {
        info!(
            "Scoring batch {}/{} with {} jobs...",
            i + 1,
            total_batches,
            batch.len()
        );

        let scores = scorer
            .score_batch(batch, profile_summary, desired_job_summary)
            .await?;
        all_scores.extend(scores);

        if i + 1 < total_batches {
            tokio::time::sleep(BATCH_DELAY).await;
        }
    }

    Ok(all_scores)
}
