use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use thiserror::Error;

use crate::core::ai::{build_scoring_prompt, parse_scored_candidates};
use crate::core::recommender::{CandidateScorer, ScoreError};
use crate::models::{Candidate, Event, ScoredCandidate};

/// Default Gemini API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Default model when the configuration names none
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Hard ceiling on how long one scoring call may block the cascade
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors that can occur when calling the Gemini API
#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Thin client for the Gemini generateContent endpoint.
///
/// Text prompt in, model text out; all prompt templating and array
/// extraction live in `core::ai`. The request timeout bounds the AI tier so
/// an unresponsive scorer degrades instead of hanging the cascade.
pub struct GeminiClient {
    base_url: String,
    api_key: String,
    model: String,
    client: Client,
}

impl GeminiClient {
    pub fn new(base_url: String, api_key: String, model: String) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        let model = if model.is_empty() {
            DEFAULT_MODEL.to_string()
        } else {
            model
        };

        Self {
            base_url,
            api_key,
            model,
            client,
        }
    }

    /// Whether a usable API key is present. Without one the AI tier is
    /// skipped cleanly.
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// Key with everything past the first few characters hidden, for logs.
    pub fn masked_key(&self) -> String {
        if self.api_key.is_empty() {
            return "NONE".to_string();
        }
        // Truncate by characters, not bytes; keys are not guaranteed ASCII
        if self.api_key.chars().count() > 5 {
            let prefix: String = self.api_key.chars().take(5).collect();
            format!("{}...", prefix)
        } else {
            "***".to_string()
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send one prompt and return the model's text output.
    pub async fn generate(&self, prompt: &str) -> Result<String, GeminiError> {
        let url = format!(
            "{}/v1/models/{}:generateContent?key={}",
            self.base_url.trim_end_matches('/'),
            self.model,
            self.api_key
        );

        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let response = self.client.post(&url).json(&body).send().await?;

        if !response.status().is_success() {
            return Err(GeminiError::ApiError(format!(
                "generateContent returned {}",
                response.status()
            )));
        }

        let payload: Value = response.json().await?;
        extract_text(&payload)
            .ok_or_else(|| GeminiError::InvalidResponse("missing candidates[0].content.parts[0].text".into()))
    }
}

/// Unwrap the generateContent envelope down to the model text.
fn extract_text(payload: &Value) -> Option<String> {
    payload
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .get(0)?
        .get("text")?
        .as_str()
        .map(str::to_string)
}

/// AI scoring tier: prompt construction, Gemini call, response validation.
///
/// Any transport failure, timeout, or unparsable payload is reported as a
/// `ScoreError` and handled by the cascade; nothing here panics or blocks
/// past the client timeout.
pub struct GeminiScorer {
    client: GeminiClient,
}

impl GeminiScorer {
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CandidateScorer for GeminiScorer {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn score(
        &self,
        event: &Event,
        candidates: &[Candidate],
    ) -> Result<Vec<ScoredCandidate>, ScoreError> {
        if !self.client.is_configured() {
            return Err(ScoreError::NotConfigured);
        }

        let prompt = build_scoring_prompt(event, candidates);
        tracing::debug!(
            "Scoring {} candidates for event {} via {}",
            candidates.len(),
            event.id,
            self.client.model()
        );

        let text = self
            .client
            .generate(&prompt)
            .await
            .map_err(|e| ScoreError::Upstream(e.to_string()))?;

        let ranked = parse_scored_candidates(&text, event, candidates)
            .map_err(|e| ScoreError::Malformed(e.to_string()))?;

        Ok(ranked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_configuration_check() {
        let unconfigured =
            GeminiClient::new(DEFAULT_ENDPOINT.to_string(), String::new(), String::new());
        assert!(!unconfigured.is_configured());
        assert_eq!(unconfigured.masked_key(), "NONE");

        let configured = GeminiClient::new(
            DEFAULT_ENDPOINT.to_string(),
            "abcdef123456".to_string(),
            String::new(),
        );
        assert!(configured.is_configured());
        assert_eq!(configured.masked_key(), "abcde...");
        assert_eq!(configured.model(), DEFAULT_MODEL);
    }

    #[test]
    fn test_masked_key_handles_multibyte_keys() {
        let client = GeminiClient::new(
            DEFAULT_ENDPOINT.to_string(),
            "ключ-секрет".to_string(),
            String::new(),
        );
        assert_eq!(client.masked_key(), "ключ-...");

        let short = GeminiClient::new(
            DEFAULT_ENDPOINT.to_string(),
            "ключ".to_string(),
            String::new(),
        );
        assert_eq!(short.masked_key(), "***");
    }

    #[test]
    fn test_extract_text_from_envelope() {
        let payload = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "[{\"candidateId\": \"c1\"}]" }] }
            }]
        });
        assert_eq!(
            extract_text(&payload).as_deref(),
            Some("[{\"candidateId\": \"c1\"}]")
        );
    }

    #[test]
    fn test_extract_text_missing_parts() {
        assert!(extract_text(&json!({})).is_none());
        assert!(extract_text(&json!({"candidates": []})).is_none());
        assert!(extract_text(&json!({"candidates": [{"content": {}}]})).is_none());
    }

    #[tokio::test]
    async fn test_unconfigured_scorer_skips_cleanly() {
        let scorer = GeminiScorer::new(GeminiClient::new(
            DEFAULT_ENDPOINT.to_string(),
            String::new(),
            String::new(),
        ));

        let event = Event {
            id: "h1".to_string(),
            title: "Hack".to_string(),
            theme: String::new(),
            organization: String::new(),
            mode: String::new(),
            location: String::new(),
            latitude: None,
            longitude: None,
            tech_stack: vec![],
            created_by: String::new(),
            accepted_participants: vec![],
            registration_start: None,
            registration_end: None,
        };

        let result = scorer.score(&event, &[]).await;
        assert!(matches!(result, Err(ScoreError::NotConfigured)));
    }
}
