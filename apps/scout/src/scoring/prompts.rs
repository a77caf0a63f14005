// All LLM prompt constants for the scoring module.

/// System prompt for job scoring - enforces JSON-only output.
pub const SCORING_SYSTEM: &str = "You are an expert recruiter scoring job postings \
    against a candidate profile. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Scoring prompt template. Replace `{profile_summary}`,
/// `{desired_job_summary}` and `{jobs_json}` before sending.
pub const SCORING_PROMPT_TEMPLATE: &str = r#"Given the following candidate profile:
{profile_summary}

Desired job description:
{desired_job_summary}

Score each job posting accurately from 0 to 100 on how well it matches the profile and desired job.
For each job, add a short comment (max 50 words) explaining the score and match quality.

Return a JSON object with this EXACT schema (no extra fields):
{
  "scores": [
    {"job_posting_id": "4071234567", "score": 87, "comment": "Strong overlap on required skills."}
  ]
}

Include exactly one entry per job posting, keyed by its job_posting_id.

Jobs:
{jobs_json}"#;
