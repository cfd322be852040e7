use serde::{Deserialize, Serialize};

use crate::models::domain::{Event, ScoredCandidate, ScoredEvent};

/// Response for the rank-events endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankEventsResponse {
    pub recommendations: Vec<ScoredEvent>,
    pub count: usize,
}

/// Response for the rank-candidates endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankCandidatesResponse {
    pub recommendations: Vec<ScoredCandidate>,
    pub count: usize,
}

/// Response for the nearby-events endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbyEventsResponse {
    pub events: Vec<Event>,
    pub count: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
