use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-participant proficiency weights, keyed by technology name.
///
/// Sourced from the profile store per ranking call and never persisted here.
/// An empty map means "no profile data available".
pub type ProficiencyMapping = HashMap<String, u32>;

/// A hackathon event as supplied by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub theme: String,
    #[serde(default)]
    pub organization: String,
    #[serde(default)]
    pub mode: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(rename = "techStack", alias = "tech_stack", default)]
    pub tech_stack: Vec<String>,
    #[serde(rename = "createdBy", alias = "created_by", default)]
    pub created_by: String,
    #[serde(rename = "acceptedParticipants", alias = "accepted_participants", default)]
    pub accepted_participants: Vec<String>,
    #[serde(rename = "registrationStart", alias = "registration_start", default)]
    pub registration_start: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(rename = "registrationEnd", alias = "registration_end", default)]
    pub registration_end: Option<chrono::DateTime<chrono::Utc>>,
}

impl Event {
    /// Both coordinates, when the event has a location fix.
    pub fn coords(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }

    /// Whether the registration window is open at `now`.
    ///
    /// A missing start means "already open", a missing end means "never
    /// closes", so events without dates are treated as registrable.
    pub fn is_registration_open(&self, now: chrono::DateTime<chrono::Utc>) -> bool {
        let started = self.registration_start.map_or(true, |s| s <= now);
        let not_ended = self.registration_end.map_or(true, |e| e > now);
        started && not_ended
    }
}

/// A participant snapshot supplied by the caller for candidate ranking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub username: String,
    #[serde(rename = "displayName", alias = "display_name", default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    /// Technology name -> proficiency weight. Empty means no profile data.
    #[serde(default)]
    pub skills: ProficiencyMapping,
}

impl Candidate {
    /// Display name, falling back to the username.
    pub fn name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.username)
    }

    /// A candidate record we can actually surface: non-empty id and username.
    pub fn is_structurally_valid(&self) -> bool {
        !self.id.is_empty() && !self.username.is_empty()
    }
}

/// An event scored against one participant's proficiency mapping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredEvent {
    pub event: Event,
    #[serde(rename = "matchCount")]
    pub match_count: u32,
    #[serde(rename = "proficiencyScore")]
    pub proficiency_score: f64,
}

/// A candidate scored against one event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredCandidate {
    #[serde(rename = "candidateId", alias = "candidate_id", alias = "userId")]
    pub candidate_id: String,
    pub name: String,
    /// Always within [0, 100].
    pub score: f64,
    /// Subset of the event's required technology list, in the event's
    /// spelling.
    #[serde(rename = "matchedSkills", alias = "matched_skills", default)]
    pub matched_skills: Vec<String>,
}

/// Geospatial bounding box used as a cheap pre-filter before haversine.
#[derive(Debug, Clone, Copy)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}
