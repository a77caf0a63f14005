//! Bright Data scrape client. Triggers a "discover by keyword" LinkedIn
//! job search and polls the snapshot until the result set is ready.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;

use crate::config::SearchConfig;
use crate::errors::AppError;

const BASE_URL: &str = "https://api.brightdata.com/datasets/v3";
/// "LinkedIn job listings information - discover by keyword" dataset.
const DATASET_ID: &str = "gd_lpfll7v5hcqtkxl6l";

/// One scraped job listing. The provider defines the columns; the handful
/// the pipeline needs are typed, everything else rides along untouched
/// and reappears in the CSV.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobListing {
    #[serde(default)]
    pub job_posting_id: Option<String>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct TriggerResponse {
    #[serde(default)]
    snapshot_id: Option<String>,
}

/// Trigger payload for a single search input. Absent optionals are sent
/// as empty strings per the provider contract.
#[derive(Debug, Serialize)]
struct TriggerInput<'a> {
    location: &'a str,
    keyword: &'a str,
    country: &'a str,
    time_range: &'a str,
    job_type: &'a str,
    experience_level: &'a str,
    remote: &'a str,
    company: &'a str,
    selective_search: bool,
    jobs_to_not_include: &'a [String],
    location_radius: &'a str,
}

impl<'a> TriggerInput<'a> {
    fn from_config(config: &'a SearchConfig) -> Self {
        Self {
            location: &config.location,
            keyword: config.keyword.as_deref().unwrap_or(""),
            country: config.country.as_deref().unwrap_or(""),
            time_range: config.time_range.as_deref().unwrap_or(""),
            job_type: config.job_type.as_deref().unwrap_or(""),
            experience_level: config.experience_level.as_deref().unwrap_or(""),
            remote: config.remote.as_deref().unwrap_or(""),
            company: config.company.as_deref().unwrap_or(""),
            selective_search: config.selective_search,
            jobs_to_not_include: &config.jobs_to_not_include,
            location_radius: config.location_radius.as_deref().unwrap_or(""),
        }
    }
}

/// Bright Data datasets API client: one trigger call, then fixed-interval
/// snapshot polling until a terminal status arrives.
pub struct ScrapeClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl ScrapeClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: BASE_URL.to_string(),
        }
    }

    /// Starts the scrape and returns the snapshot id to poll.
    pub async fn trigger_search(
        &self,
        config: &SearchConfig,
        jobs_number: u32,
    ) -> Result<String, AppError> {
        let url = format!("{}/trigger", self.base_url);
        let limit = jobs_number.to_string();
        let params = [
            ("dataset_id", DATASET_ID),
            ("include_errors", "true"),
            ("type", "discover_new"),
            ("discover_by", "keyword"),
            ("limit_per_input", limit.as_str()),
        ];
        let body = [TriggerInput::from_config(config)];

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .query(&params)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() != 200 {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Trigger {
                status: status.as_u16(),
                body,
            });
        }

        let trigger: TriggerResponse = response.json().await?;
        trigger
            .snapshot_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| AppError::Trigger {
                status: status.as_u16(),
                body: "no snapshot_id in trigger response".to_string(),
            })
    }

    /// Polls the snapshot until the result set is ready and returns it.
    /// 202 means the scrape is still running; retried at a fixed interval,
    /// no backoff, no attempt cap.
    pub async fn poll_snapshot(
        &self,
        snapshot_id: &str,
        poll_interval: Duration,
    ) -> Result<Vec<JobListing>, AppError> {
        let url = format!("{}/snapshot/{}?format=json", self.base_url, snapshot_id);

        info!("Polling snapshot {snapshot_id}");

        loop {
            let response = self
                .client
                .get(&url)
                .bearer_auth(&self.api_key)
                .send()
                .await?;

            match response.status().as_u16() {
                200 => {
                    info!("Snapshot is ready");
                    return Ok(response.json::<Vec<JobListing>>().await?);
                }
                202 => {
                    info!(
                        "Snapshot not ready yet, retrying in {}s...",
                        poll_interval.as_secs()
                    );
                    tokio::time::sleep(poll_interval).await;
                }
                status => {
                    let body = response.text().await.unwrap_or_default();
                    return Err(AppError::Snapshot { status, body });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_config() -> SearchConfig {
        serde_json::from_str(
            r#"{
                "location": "Berlin",
                "profile_summary": "profile",
                "desired_job_summary": "desired"
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_trigger_input_sends_empty_strings_for_absent_optionals() {
        let config = minimal_config();
        let input = TriggerInput::from_config(&config);
        let value = serde_json::to_value(&input).unwrap();
        assert_eq!(value["location"], "Berlin");
        assert_eq!(value["keyword"], "");
        assert_eq!(value["company"], "");
        assert_eq!(value["selective_search"], false);
        assert_eq!(value["jobs_to_not_include"], serde_json::json!([]));
    }

    #[test]
    fn test_trigger_input_carries_configured_fields() {
        let mut config = minimal_config();
        config.keyword = Some("rust engineer".to_string());
        config.selective_search = true;
        let input = TriggerInput::from_config(&config);
        let value = serde_json::to_value(&input).unwrap();
        assert_eq!(value["keyword"], "rust engineer");
        assert_eq!(value["selective_search"], true);
    }

    #[test]
    fn test_job_listing_keeps_unknown_provider_columns() {
        let json = r#"{
            "job_posting_id": "4071",
            "job_title": "Rust Engineer",
            "url": "https://example.com/jobs/4071",
            "company_name": "Acme",
            "salary": null
        }"#;
        let listing: JobListing = serde_json::from_str(json).unwrap();
        assert_eq!(listing.job_posting_id.as_deref(), Some("4071"));
        assert_eq!(listing.extra["company_name"], "Acme");

        // unknown columns survive re-serialization
        let value = serde_json::to_value(&listing).unwrap();
        assert_eq!(value["company_name"], "Acme");
        assert_eq!(value["job_title"], "Rust Engineer");
    }

    #[test]
    fn test_trigger_response_without_snapshot_id_parses_to_none() {
        let trigger: TriggerResponse = serde_json::from_str("{}").unwrap();
        assert!(trigger.snapshot_id.is_none());
    }
}
