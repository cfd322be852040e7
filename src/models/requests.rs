use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{Candidate, Event};

/// Request to rank events for a participant
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RankEventsRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "participant_id", rename = "participantId")]
    pub participant_id: String,
    #[serde(default)]
    pub events: Vec<Event>,
}

/// Request to rank candidates for an event
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RankCandidatesRequest {
    pub event: Event,
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// Request to filter events by proximity to a point
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NearbyEventsRequest {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    #[validate(range(min = 0.0))]
    #[serde(default = "default_radius_km")]
    #[serde(alias = "radius_km", rename = "radiusKm")]
    pub radius_km: f64,
    #[serde(default)]
    pub events: Vec<Event>,
}

fn default_radius_km() -> f64 {
    crate::core::proximity::DEFAULT_RADIUS_KM
}
