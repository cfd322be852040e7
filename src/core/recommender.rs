use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::{Candidate, Event, ScoredCandidate};

/// Score assigned when a candidate is surfaced without any skill evidence
/// (backup bucket and last resort).
pub const LAST_RESORT_SCORE: f64 = 10.0;

/// Cap on the number of candidates handed to a scoring tier, to keep AI
/// payloads bounded.
pub const DEFAULT_CANDIDATE_CAP: usize = 200;

/// Why a scoring tier produced nothing usable
#[derive(Debug, Error)]
pub enum ScoreError {
    /// The tier has no credentials/configuration; a clean skip, not a fault.
    #[error("scorer is not configured")]
    NotConfigured,

    #[error("upstream scoring call failed: {0}")]
    Upstream(String),

    #[error("malformed scoring response: {0}")]
    Malformed(String),
}

/// One scoring strategy in the cascade.
///
/// Implementations score a batch of eligible candidates against one event.
/// Returning an error or an empty list hands control to the next tier; the
/// orchestrator never lets either escape to its caller.
#[async_trait]
pub trait CandidateScorer: Send + Sync {
    /// Short name used in degradation logs
    fn name(&self) -> &'static str;

    async fn score(
        &self,
        event: &Event,
        candidates: &[Candidate],
    ) -> Result<Vec<ScoredCandidate>, ScoreError>;
}

/// Sort a tier result: score descending, then matched-skill count descending.
pub fn sort_ranked(ranked: &mut [ScoredCandidate]) {
    ranked.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| b.matched_skills.len().cmp(&a.matched_skills.len()))
    });
}

/// First structurally valid candidate as a single-element result.
///
/// This is the terminal guarantee of the cascade: empty only when no
/// candidate in the slice carries a usable id and username.
pub fn last_resort(candidates: &[Candidate]) -> Vec<ScoredCandidate> {
    candidates
        .iter()
        .find(|c| c.is_structurally_valid())
        .map(|c| {
            info!("Last resort: returning single candidate {}", c.name());
            vec![ScoredCandidate {
                candidate_id: c.id.clone(),
                name: c.name().to_string(),
                score: LAST_RESORT_SCORE,
                matched_skills: Vec::new(),
            }]
        })
        .unwrap_or_default()
}

/// Orchestrates the scoring cascade for candidates-for-event ranking.
///
/// Tiers are tried in order; the first one that yields a non-empty,
/// well-formed result wins. After all tiers fail, a last-resort single
/// candidate is returned, falling back to the original unfiltered set when
/// exclusion removed everyone. The result is empty only when no structurally
/// valid candidate exists at all. This method is total: scorer errors are
/// logged and degraded, never propagated.
pub struct Recommender {
    scorers: Vec<Arc<dyn CandidateScorer>>,
    candidate_cap: usize,
}

impl Recommender {
    pub fn new(scorers: Vec<Arc<dyn CandidateScorer>>) -> Self {
        Self {
            scorers,
            candidate_cap: DEFAULT_CANDIDATE_CAP,
        }
    }

    pub fn with_candidate_cap(mut self, cap: usize) -> Self {
        self.candidate_cap = cap;
        self
    }

    pub async fn rank_candidates(
        &self,
        event: &Event,
        all_candidates: &[Candidate],
    ) -> Vec<ScoredCandidate> {
        if all_candidates.is_empty() {
            return Vec::new();
        }

        // Creator and already-accepted participants never get recommended.
        // Callers have stored either ids or usernames historically, so the
        // exclusion set is matched against both.
        let mut excluded: HashSet<&str> = event
            .accepted_participants
            .iter()
            .map(String::as_str)
            .collect();
        if !event.created_by.is_empty() {
            excluded.insert(event.created_by.as_str());
        }

        let eligible: Vec<Candidate> = all_candidates
            .iter()
            .filter(|c| {
                !c.username.is_empty()
                    && !excluded.contains(c.id.as_str())
                    && !excluded.contains(c.username.as_str())
            })
            .take(self.candidate_cap)
            .cloned()
            .collect();

        debug!(
            "Eligible candidates for event {}: {} (of {} supplied)",
            event.id,
            eligible.len(),
            all_candidates.len()
        );

        if eligible.is_empty() {
            // Exclusion covered everyone; keep the UI populated with one
            // candidate from the unfiltered set rather than an empty panel.
            warn!(
                "All candidates excluded for event {}, using last resort over the original set",
                event.id
            );
            return last_resort(all_candidates);
        }

        for scorer in &self.scorers {
            match scorer.score(event, &eligible).await {
                Ok(mut ranked) if !ranked.is_empty() => {
                    sort_ranked(&mut ranked);
                    info!(
                        "Scorer '{}' ranked {} candidates for event {}",
                        scorer.name(),
                        ranked.len(),
                        event.id
                    );
                    return ranked;
                }
                Ok(_) => {
                    debug!("Scorer '{}' returned no candidates, degrading", scorer.name());
                }
                Err(ScoreError::NotConfigured) => {
                    debug!("Scorer '{}' not configured, skipping", scorer.name());
                }
                Err(e) => {
                    warn!("Scorer '{}' failed ({}), degrading to next tier", scorer.name(), e);
                }
            }
        }

        let result = last_resort(&eligible);
        if result.is_empty() {
            last_resort(all_candidates)
        } else {
            result
        }
    }
}
