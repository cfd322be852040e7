//! HackMatch Algo - matching and ranking service for a hackathon-discovery
//! platform.
//!
//! The core pairs participants with events three ways: ranking events for a
//! participant by tech-stack proficiency, ranking candidates for an event
//! through an AI-assisted scoring cascade with a guaranteed non-empty
//! result, and filtering events by great-circle proximity.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{
    haversine_distance, nearby_events, rank_events, CandidateScorer, Recommender, ScoreError,
    SkillOverlapScorer,
};
pub use models::{Candidate, Event, ProficiencyMapping, ScoredCandidate, ScoredEvent};
