use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde_json::Value;
use thiserror::Error;

use crate::models::ProficiencyMapping;

/// Errors that can occur when talking to the profile store
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Client for the proficiency-profile store.
///
/// Fetches a participant's technology usage weights. "No profile" is an
/// empty mapping, never an error; only transport and server faults surface
/// as `ProfileError`.
pub struct SkillProfileClient {
    base_url: String,
    api_key: String,
    client: Client,
}

impl SkillProfileClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            api_key,
            client,
        }
    }

    /// Fetch the proficiency mapping for a participant.
    pub async fn get_proficiency(
        &self,
        participant_id: &str,
    ) -> Result<ProficiencyMapping, ProfileError> {
        let url = format!(
            "{}/api/v1/stats/{}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(participant_id)
        );

        tracing::debug!("Fetching proficiency profile from: {}", url);

        let response = self
            .client
            .get(&url)
            .header("X-Api-Key", &self.api_key)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            tracing::debug!("No proficiency profile for {}", participant_id);
            return Ok(ProficiencyMapping::new());
        }

        if !response.status().is_success() {
            return Err(ProfileError::ApiError(format!(
                "Failed to fetch profile stats: {}",
                response.status()
            )));
        }

        let payload: Value = response.json().await?;
        Ok(parse_usage(&payload))
    }
}

/// Read the `frameworkUsage` object into a mapping; anything missing or
/// non-numeric is treated as absent data rather than a fault.
fn parse_usage(payload: &Value) -> ProficiencyMapping {
    let usage = payload
        .get("frameworkUsage")
        .or_else(|| payload.get("framework_usage"))
        .and_then(Value::as_object);

    match usage {
        Some(map) => map
            .iter()
            .filter_map(|(name, value)| {
                value
                    .as_u64()
                    .map(|weight| (name.clone(), weight.min(u64::from(u32::MAX)) as u32))
            })
            .collect(),
        None => ProficiencyMapping::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_usage_object() {
        let payload = json!({
            "username": "alice",
            "frameworkUsage": { "React": 12, "Node.js": 4 }
        });

        let usage = parse_usage(&payload);
        assert_eq!(usage.get("React"), Some(&12));
        assert_eq!(usage.get("Node.js"), Some(&4));
    }

    #[test]
    fn test_parse_usage_missing_is_empty() {
        assert!(parse_usage(&json!({"username": "alice"})).is_empty());
        assert!(parse_usage(&json!(null)).is_empty());
    }

    #[test]
    fn test_parse_usage_skips_non_numeric_entries() {
        let payload = json!({
            "frameworkUsage": { "React": 5, "Vue": "lots", "Svelte": -2 }
        });

        let usage = parse_usage(&payload);
        assert_eq!(usage.len(), 1);
        assert_eq!(usage.get("React"), Some(&5));
    }

    #[test]
    fn test_client_creation() {
        let client = SkillProfileClient::new(
            "https://profiles.test/".to_string(),
            "test_key".to_string(),
        );
        assert_eq!(client.base_url, "https://profiles.test/");
        assert_eq!(client.api_key, "test_key");
    }
}
