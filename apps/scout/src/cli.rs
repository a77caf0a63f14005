use std::path::PathBuf;

use clap::Parser;

/// LinkedIn job hunting assistant: scrape listings, score them against
/// your profile with an LLM, export a ranked CSV.
#[derive(Debug, Clone, Parser)]
#[command(name = "scout", version, about)]
pub struct Args {
    /// Path to the search config JSON file
    #[arg(long, default_value = "config.json")]
    pub config: PathBuf,

    /// Limit on the number of jobs returned by the scrape
    #[arg(long, default_value_t = 20)]
    pub jobs_number: u32,

    /// Number of jobs scored per LLM call
    #[arg(long, default_value_t = 5)]
    pub batch_size: usize,

    /// Output CSV filename
    #[arg(long, default_value = "jobs_scored.csv")]
    pub output: PathBuf,

    /// Number of top matches printed after export
    #[arg(long, default_value_t = 3)]
    pub top: usize,

    /// Fixed delay between snapshot polls, in seconds
    #[arg(long, default_value_t = 10)]
    pub poll_interval_secs: u64,

    /// Quiet mode - only warnings and errors are logged
    #[arg(short, long)]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["scout"]).unwrap();
        assert_eq!(args.config, PathBuf::from("config.json"));
        assert_eq!(args.jobs_number, 20);
        assert_eq!(args.batch_size, 5);
        assert_eq!(args.output, PathBuf::from("jobs_scored.csv"));
        assert_eq!(args.top, 3);
        assert_eq!(args.poll_interval_secs, 10);
        assert!(!args.quiet);
    }

    #[test]
    fn test_overrides() {
        let args = Args::try_parse_from([
            "scout",
            "--config",
            "search.json",
            "--jobs-number",
            "50",
            "--batch-size",
            "10",
            "--output",
            "ranked.csv",
            "--quiet",
        ])
        .unwrap();
        assert_eq!(args.config, PathBuf::from("search.json"));
        assert_eq!(args.jobs_number, 50);
        assert_eq!(args.batch_size, 10);
        assert_eq!(args.output, PathBuf::from("ranked.csv"));
        assert!(args.quiet);
    }

    #[test]
    fn test_rejects_non_numeric_batch_size() {
        assert!(Args::try_parse_from(["scout", "--batch-size", "five"]).is_err());
    }
}
