use std::collections::HashMap;

use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::debug;

use crate::core::normalize::normalize_tech;
use crate::models::{Candidate, Event, ScoredCandidate};

/// Errors extracting a scored-candidate array from model output
#[derive(Debug, Error)]
pub enum AiParseError {
    #[error("no JSON array found in model output")]
    NoArray,

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Build the scoring prompt for one event and a batch of candidates.
///
/// Each candidate contributes only id, display name, skill names, and bio;
/// credentials and contact fields never enter the prompt. Candidates without
/// a username are skipped.
pub fn build_scoring_prompt(event: &Event, candidates: &[Candidate]) -> String {
    let users_json: Vec<String> = candidates
        .iter()
        .filter(|c| !c.username.is_empty())
        .map(|c| {
            let skills: Vec<&String> = c.skills.keys().collect();
            json!({
                "id": c.id,
                "name": c.name(),
                "skills": skills,
                "bio": c.bio.as_deref().unwrap_or("").replace('\n', " "),
            })
            .to_string()
        })
        .collect();

    format!(
        "You are an AI hackathon recruiter.\n\
         \n\
         Hackathon:\n\
         Title: {title}\n\
         Theme: {theme}\n\
         Organization: {organization}\n\
         Required Tech Stacks: {tech}\n\
         Mode: {mode}\n\
         Location: {location}\n\
         \n\
         Users:\n\
         [{users}]\n\
         \n\
         Task:\n\
         - Score each user from 0 to 100 based on how well they match the hackathon requirements\n\
         - Consider: tech stack alignment, experience level, and relevance to theme\n\
         - Return ONLY a JSON array in this exact format:\n\
         [{{\"candidateId\": \"user123\", \"score\": 85, \"matchedSkills\": [\"React\", \"Node.js\"]}}]\n\
         \n\
         CRITICAL REQUIREMENTS:\n\
         1. You MUST return AT LEAST ONE user (the one with the best match, even if score is low)\n\
         2. Include ALL users who have at least one matching skill\n\
         3. Sort the array by score in DESCENDING order (highest score first)\n\
         4. matchedSkills must only include skills that are in the hackathon's required tech stacks\n\
         \n\
         Rules:\n\
         - Return ONLY the JSON array, no explanation text\n\
         - Array must be sorted by score (highest to lowest)\n\
         - Minimum 1 user must be returned (the best match)",
        title = event.title,
        theme = event.theme,
        organization = event.organization,
        tech = event.tech_stack.join(", "),
        mode = event.mode,
        location = event.location,
        users = users_json.join(",\n"),
    )
}

/// Pull the first top-level JSON array out of free-form model output.
///
/// Tolerates markdown code fences and explanatory text around the payload by
/// taking the substring from the first '[' to the last ']'.
pub fn extract_json_array(text: &str) -> Option<&str> {
    let stripped = text.trim();
    let start = stripped.find('[')?;
    let end = stripped.rfind(']')?;
    if end <= start {
        return None;
    }
    Some(&stripped[start..=end])
}

/// Raw entry as the model emits it; lenient so one malformed field does not
/// reject the whole array.
#[derive(Debug, Deserialize)]
struct RawScoredEntry {
    #[serde(rename = "candidateId", alias = "candidate_id", alias = "userId", default)]
    candidate_id: Option<String>,
    #[serde(default)]
    score: Option<f64>,
    #[serde(rename = "matchedSkills", alias = "matched_skills", default)]
    matched_skills: Vec<String>,
}

/// Parse model output into validated scored candidates.
///
/// Validation per entry:
/// - unknown candidate ids are discarded;
/// - scores are clamped into [0, 100] (missing score counts as 0);
/// - matched skills not in the event's required list (normalized comparison)
///   are dropped from the entry, re-spelled as the event spells them;
/// - display names come from the candidate snapshot, not the model.
///
/// Output order is whatever the model produced; the cascade re-sorts.
pub fn parse_scored_candidates(
    text: &str,
    event: &Event,
    candidates: &[Candidate],
) -> Result<Vec<ScoredCandidate>, AiParseError> {
    let array = extract_json_array(text).ok_or(AiParseError::NoArray)?;
    let entries: Vec<RawScoredEntry> = serde_json::from_str(array)?;

    let by_id: HashMap<&str, &Candidate> = candidates
        .iter()
        .filter(|c| !c.id.is_empty())
        .map(|c| (c.id.as_str(), c))
        .collect();

    // Normalized required tech -> the event's spelling
    let required: HashMap<String, &str> = event
        .tech_stack
        .iter()
        .map(|t| (normalize_tech(t), t.as_str()))
        .collect();

    let mut scored = Vec::new();
    for entry in entries {
        let Some(id) = entry.candidate_id else {
            continue;
        };
        let Some(candidate) = by_id.get(id.as_str()) else {
            debug!("Dropping scored entry for unknown candidate id {}", id);
            continue;
        };

        let matched_skills: Vec<String> = entry
            .matched_skills
            .iter()
            .filter_map(|skill| required.get(&normalize_tech(skill)).map(|s| s.to_string()))
            .collect();

        scored.push(ScoredCandidate {
            candidate_id: id,
            name: candidate.name().to_string(),
            score: entry.score.unwrap_or(0.0).clamp(0.0, 100.0),
            matched_skills,
        });
    }

    Ok(scored)
}
