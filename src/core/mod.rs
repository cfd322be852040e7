// Core algorithm exports
pub mod ai;
pub mod distance;
pub mod event_ranker;
pub mod fallback;
pub mod normalize;
pub mod proximity;
pub mod recommender;

pub use distance::{calculate_bounding_box, haversine_distance, is_within_bounding_box};
pub use event_ranker::rank_events;
pub use fallback::SkillOverlapScorer;
pub use normalize::normalize_tech;
pub use proximity::{nearby_events, DEFAULT_RADIUS_KM};
pub use recommender::{CandidateScorer, Recommender, ScoreError};
