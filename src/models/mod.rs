// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{BoundingBox, Candidate, Event, ProficiencyMapping, ScoredCandidate, ScoredEvent};
pub use requests::{NearbyEventsRequest, RankCandidatesRequest, RankEventsRequest};
pub use responses::{
    ErrorResponse, HealthResponse, NearbyEventsResponse, RankCandidatesResponse,
    RankEventsResponse,
};
