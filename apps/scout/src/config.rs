use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// API credentials loaded from environment variables.
/// Fails at startup if a required variable is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub bright_data_api_key: String,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            bright_data_api_key: require_env("BRIGHT_DATA_API_KEY")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Job search parameters plus the two candidate summaries used for scoring.
/// Loaded from a JSON file once at startup and validated; immutable thereafter.
///
/// The search fields mirror the Bright Data "discover by keyword" input
/// contract for LinkedIn job listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    pub location: String,
    #[serde(default)]
    pub keyword: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub time_range: Option<String>,
    #[serde(default)]
    pub job_type: Option<String>,
    #[serde(default)]
    pub experience_level: Option<String>,
    #[serde(default)]
    pub remote: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub selective_search: bool,
    #[serde(default)]
    pub jobs_to_not_include: Vec<String>,
    #[serde(default)]
    pub location_radius: Option<String>,

    /// Candidate's profile summary, embedded in every scoring prompt.
    pub profile_summary: String,
    /// Description of the role the candidate wants, embedded in every scoring prompt.
    pub desired_job_summary: String,
}

impl SearchConfig {
    /// Loads and validates a search config from a JSON file.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let raw = std::fs::read_to_string(path).map_err(|_| {
            AppError::Config(format!("Config file '{}' not found", path.display()))
        })?;

        let config: SearchConfig = serde_json::from_str(&raw)
            .map_err(|e| AppError::Config(format!("Config deserialization error: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), AppError> {
        if self.location.trim().is_empty() {
            return Err(AppError::Config("'location' must not be empty".to_string()));
        }
        if self.profile_summary.trim().is_empty() {
            return Err(AppError::Config(
                "'profile_summary' must not be empty".to_string(),
            ));
        }
        if self.desired_job_summary.trim().is_empty() {
            return Err(AppError::Config(
                "'desired_job_summary' must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
