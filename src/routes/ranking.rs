use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

use crate::core::{nearby_events, rank_events, Recommender};
use crate::models::{
    ErrorResponse, HealthResponse, NearbyEventsRequest, NearbyEventsResponse,
    RankCandidatesRequest, RankCandidatesResponse, RankEventsRequest, RankEventsResponse,
};
use crate::services::SkillProfileClient;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub profiles: Arc<SkillProfileClient>,
    pub recommender: Arc<Recommender>,
}

/// Configure all ranking routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/rank/events", web::post().to(rank_events_handler))
        .route("/rank/candidates", web::post().to(rank_candidates_handler))
        .route("/events/nearby", web::post().to(nearby_events_handler));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Rank events for a participant
///
/// POST /api/v1/rank/events
///
/// The participant's proficiency mapping is resolved through the profile
/// store; an unknown participant gets an empty mapping and therefore an
/// empty recommendation list, not an error.
async fn rank_events_handler(
    state: web::Data<AppState>,
    req: web::Json<RankEventsRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let req = req.into_inner();
    tracing::info!(
        "Ranking {} events for participant {}",
        req.events.len(),
        req.participant_id
    );

    let proficiency = match state.profiles.get_proficiency(&req.participant_id).await {
        Ok(mapping) => mapping,
        Err(e) => {
            tracing::error!(
                "Failed to fetch proficiency for {}: {}",
                req.participant_id,
                e
            );
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch proficiency profile".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let recommendations = rank_events(&proficiency, req.events);
    let count = recommendations.len();

    tracing::info!(
        "Returning {} event recommendations for participant {}",
        count,
        req.participant_id
    );

    HttpResponse::Ok().json(RankEventsResponse {
        recommendations,
        count,
    })
}

/// Rank candidates for an event
///
/// POST /api/v1/rank/candidates
///
/// Always answers 200; the cascade inside the recommender guarantees a
/// non-empty list whenever any structurally valid candidate exists.
async fn rank_candidates_handler(
    state: web::Data<AppState>,
    req: web::Json<RankCandidatesRequest>,
) -> impl Responder {
    let req = req.into_inner();
    tracing::info!(
        "Ranking {} candidates for event {}",
        req.candidates.len(),
        req.event.id
    );

    let recommendations = state
        .recommender
        .rank_candidates(&req.event, &req.candidates)
        .await;
    let count = recommendations.len();

    tracing::info!(
        "Returning {} candidate recommendations for event {}",
        count,
        req.event.id
    );

    HttpResponse::Ok().json(RankCandidatesResponse {
        recommendations,
        count,
    })
}

/// Filter events by proximity to a point
///
/// POST /api/v1/events/nearby
///
/// Only events whose registration window is open are considered; events
/// without dates count as open.
async fn nearby_events_handler(req: web::Json<NearbyEventsRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let req = req.into_inner();
    let total = req.events.len();
    let now = chrono::Utc::now();
    let open: Vec<_> = req
        .events
        .into_iter()
        .filter(|event| event.is_registration_open(now))
        .collect();
    let events = nearby_events(req.latitude, req.longitude, open, req.radius_km);
    let count = events.len();

    tracing::debug!(
        "Nearby filter kept {} of {} events within {} km",
        count,
        total,
        req.radius_km
    );

    HttpResponse::Ok().json(NearbyEventsResponse { events, count })
}
