//! Result merging and export: joins scores onto listings by posting id,
//! sorts by score, writes the flat CSV and prints the top matches.

use std::collections::HashMap;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::errors::AppError;
use crate::scoring::JobScore;
use crate::scraper::JobListing;

/// A listing with its score and rationale appended. Exists only between
/// the merge and the export.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredListing {
    #[serde(flatten)]
    pub listing: JobListing,
    pub ai_score: u8,
    pub ai_comment: String,
}

/// Left-joins scores onto listings by `job_posting_id` and sorts the
/// result descending by score (stable).
///
/// A score with no matching listing is dropped; so is a listing that was
/// never scored. Listings without a posting id can never match.
pub fn merge_scores(listings: &[JobListing], scores: Vec<JobScore>) -> Vec<ScoredListing> {
    let by_id: HashMap<&str, &JobListing> = listings
        .iter()
        .filter_map(|listing| {
            listing
                .job_posting_id
                .as_deref()
                .map(|id| (id, listing))
        })
        .collect();

    let mut merged: Vec<ScoredListing> = scores
        .into_iter()
        .filter_map(|score| {
            by_id
                .get(score.job_posting_id.as_str())
                .map(|&listing| ScoredListing {
                    listing: listing.clone(),
                    ai_score: score.score,
                    ai_comment: score.comment,
                })
        })
        .collect();

    merged.sort_by(|a, b| b.ai_score.cmp(&a.ai_score));
    merged
}

/// Writes the scored listings to a flat CSV and returns the row count.
///
/// The header is derived from the first record: the typed listing columns,
/// then the remaining provider columns, then the two score columns. Rows
/// missing a column get an empty cell. An empty input writes nothing.
pub fn export_csv(rows: &[ScoredListing], path: &Path) -> Result<usize, AppError> {
    if rows.is_empty() {
        warn!("No scored jobs to export, skipping CSV");
        return Ok(0);
    }

    let columns = column_order(&rows[0]);

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(&columns)?;

    for row in rows {
        let value = serde_json::to_value(row)?;
        let cells: Vec<String> = columns
            .iter()
            .map(|column| cell_text(value.get(column.as_str())))
            .collect();
        writer.write_record(&cells)?;
    }

    writer.flush()?;
    Ok(rows.len())
}

/// Column order for the CSV header: typed columns first, then the
/// provider columns in map order, then the appended score columns.
/// Deterministic across runs.
fn column_order(first: &ScoredListing) -> Vec<String> {
    let mut columns = vec![
        "job_posting_id".to_string(),
        "job_title".to_string(),
        "url".to_string(),
    ];
    columns.extend(first.listing.extra.keys().cloned());
    columns.push("ai_score".to_string());
    columns.push("ai_comment".to_string());
    columns
}

fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Prints the top matches to stdout for quick review.
pub fn print_top(rows: &[ScoredListing], top: usize) {
    println!();
    println!("*** Top {top} job matches ***");
    for row in rows.iter().take(top) {
        println!("URL: {}", row.listing.url.as_deref().unwrap_or("N/A"));
        println!("Title: {}", row.listing.job_title.as_deref().unwrap_or("N/A"));
        println!("AI Score: {}", row.ai_score);
        println!("AI Comment: {}", row.ai_comment);
        println!("{}", "-".repeat(40));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(id: &str, title: &str) -> JobListing {
        serde_json::from_str(&format!(
            r#"{{
                "job_posting_id": "{id}",
                "job_title": "{title}",
                "url": "https://example.com/jobs/{id}",
                "company_name": "Acme",
                "location": "Berlin"
            }}"#
        ))
        .unwrap()
    }

    fn score(id: &str, score: u8) -> JobScore {
        JobScore {
            job_posting_id: id.to_string(),
            score,
            comment: format!("comment for {id}"),
        }
    }

    #[test]
    fn test_merge_joins_by_posting_id_and_sorts_descending() {
        let listings = vec![listing("1", "Low"), listing("2", "High"), listing("3", "Mid")];
        let scores = vec![score("1", 20), score("2", 95), score("3", 60)];

        let merged = merge_scores(&listings, scores);

        assert_eq!(merged.len(), 3);
        assert_eq!(merged[0].listing.job_title.as_deref(), Some("High"));
        assert_eq!(merged[1].listing.job_title.as_deref(), Some("Mid"));
        assert_eq!(merged[2].listing.job_title.as_deref(), Some("Low"));
    }

    #[test]
    fn test_merge_drops_unmatched_on_both_sides() {
        let listings = vec![listing("1", "Scored"), listing("2", "Never scored")];
        let scores = vec![score("1", 80), score("999", 70)];

        let merged = merge_scores(&listings, scores);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].listing.job_posting_id.as_deref(), Some("1"));
    }

    #[test]
    fn test_merge_ignores_listings_without_posting_id() {
        let anonymous: JobListing =
            serde_json::from_str(r#"{"job_title": "No id"}"#).unwrap();
        let merged = merge_scores(&[anonymous], vec![score("", 50)]);
        assert!(merged.is_empty());
    }

    #[test]
    fn test_merge_sort_is_stable_for_ties() {
        let listings = vec![listing("a", "First"), listing("b", "Second")];
        let scores = vec![score("a", 70), score("b", 70)];

        let merged = merge_scores(&listings, scores);

        assert_eq!(merged[0].listing.job_posting_id.as_deref(), Some("a"));
        assert_eq!(merged[1].listing.job_posting_id.as_deref(), Some("b"));
    }

    #[test]
    fn test_column_order_is_typed_then_provider_then_scores() {
        let merged = merge_scores(&[listing("1", "T")], vec![score("1", 50)]);
        let columns = column_order(&merged[0]);

        assert_eq!(&columns[..3], &["job_posting_id", "job_title", "url"]);
        assert!(columns.contains(&"company_name".to_string()));
        assert_eq!(&columns[columns.len() - 2..], &["ai_score", "ai_comment"]);
    }

    #[test]
    fn test_export_writes_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let listings = vec![listing("1", "Engineer"), listing("2", "Analyst")];
        let merged = merge_scores(&listings, vec![score("1", 90), score("2", 40)]);

        let written = export_csv(&merged, &path).unwrap();
        assert_eq!(written, 2);

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("job_posting_id,job_title,url"));
        assert!(header.ends_with("ai_score,ai_comment"));

        let first = lines.next().unwrap();
        assert!(first.contains("Engineer"));
        assert!(first.contains("90"));
    }

    #[test]
    fn test_export_leaves_missing_cells_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        // First row defines the header; second row lacks the url column.
        let full = listing("1", "Engineer");
        let sparse: JobListing = serde_json::from_str(
            r#"{"job_posting_id": "2", "job_title": "Analyst", "company_name": "Acme", "location": "Berlin"}"#,
        )
        .unwrap();

        let merged = merge_scores(&[full, sparse], vec![score("1", 90), score("2", 40)]);
        export_csv(&merged, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let sparse_row = content.lines().nth(2).unwrap();
        // url cell is empty between job_title and company_name
        assert!(sparse_row.contains("Analyst,,"));
    }

    #[test]
    fn test_export_empty_set_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let written = export_csv(&[], &path).unwrap();

        assert_eq!(written, 0);
        assert!(!path.exists());
    }

    #[test]
    fn test_cell_text_renders_non_string_values() {
        assert_eq!(cell_text(Some(&Value::Bool(true))), "true");
        assert_eq!(cell_text(Some(&serde_json::json!(42))), "42");
        assert_eq!(cell_text(Some(&Value::Null)), "");
        assert_eq!(cell_text(None), "");
    }

    #[test]
    fn test_print_top_handles_fewer_rows_than_requested() {
        let merged = merge_scores(&[listing("1", "Only")], vec![score("1", 77)]);
        print_top(&merged, 3);
    }
}
