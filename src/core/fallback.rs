use async_trait::async_trait;
use tracing::debug;

use crate::core::normalize::normalize_tech;
use crate::core::recommender::{sort_ranked, CandidateScorer, ScoreError, LAST_RESORT_SCORE};
use crate::models::{Candidate, Event, ProficiencyMapping, ScoredCandidate};

/// Deterministic scoring tier: normalized skill overlap against the event's
/// required technology list.
///
/// Candidates with at least one matched skill and a positive weight sum are
/// scored at `min(100, raw / 10)`. Candidates with no proficiency data at
/// all form a backup bucket ("no data" is not "no match") and the first of
/// them is surfaced alone when nobody scores. Candidates with a profile but
/// zero overlap are excluded. An empty result means both buckets were empty,
/// at which point the cascade's last resort takes over.
#[derive(Debug, Default, Clone, Copy)]
pub struct SkillOverlapScorer;

impl SkillOverlapScorer {
    pub fn new() -> Self {
        Self
    }

    /// Synchronous scoring body; the trait impl just wraps this. Kept
    /// separate so tests and the AI-failure equivalence property can call
    /// the tier standalone.
    pub fn score_candidates(&self, event: &Event, candidates: &[Candidate]) -> Vec<ScoredCandidate> {
        let mut scored: Vec<ScoredCandidate> = Vec::new();
        let mut backups: Vec<ScoredCandidate> = Vec::new();

        for candidate in candidates {
            if !candidate.is_structurally_valid() {
                continue;
            }

            if candidate.skills.is_empty() {
                backups.push(ScoredCandidate {
                    candidate_id: candidate.id.clone(),
                    name: candidate.name().to_string(),
                    score: LAST_RESORT_SCORE,
                    matched_skills: Vec::new(),
                });
                continue;
            }

            let (matched_skills, raw_score) = match_skills(event, &candidate.skills);
            if !matched_skills.is_empty() && raw_score > 0 {
                scored.push(ScoredCandidate {
                    candidate_id: candidate.id.clone(),
                    name: candidate.name().to_string(),
                    score: (f64::from(raw_score) / 10.0).min(100.0),
                    matched_skills,
                });
            }
            // A profile with no positive overlap is a real "no match": excluded.
        }

        debug!(
            "Fallback scoring for event {}: {} scored, {} backup",
            event.id,
            scored.len(),
            backups.len()
        );

        if !scored.is_empty() {
            sort_ranked(&mut scored);
            scored
        } else if !backups.is_empty() {
            vec![backups.remove(0)]
        } else {
            Vec::new()
        }
    }
}

/// Matched skills (in the event's spelling) and the summed proficiency
/// weight. Duplicate stack entries count once.
fn match_skills(event: &Event, skills: &ProficiencyMapping) -> (Vec<String>, u32) {
    let normalized_skills: std::collections::HashMap<String, u32> = skills
        .iter()
        .map(|(name, weight)| (normalize_tech(name), *weight))
        .collect();

    let mut seen = std::collections::HashSet::new();
    let mut matched = Vec::new();
    let mut raw_score = 0u32;

    for tech in &event.tech_stack {
        let key = normalize_tech(tech);
        if key.is_empty() || !seen.insert(key.clone()) {
            continue;
        }
        if let Some(weight) = normalized_skills.get(&key) {
            matched.push(tech.clone());
            raw_score = raw_score.saturating_add(*weight);
        }
    }

    (matched, raw_score)
}

#[async_trait]
impl CandidateScorer for SkillOverlapScorer {
    fn name(&self) -> &'static str {
        "skill-overlap"
    }

    async fn score(
        &self,
        event: &Event,
        candidates: &[Candidate],
    ) -> Result<Vec<ScoredCandidate>, ScoreError> {
        Ok(self.score_candidates(event, candidates))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(stack: &[&str]) -> Event {
        Event {
            id: "h1".to_string(),
            title: "Hack".to_string(),
            theme: String::new(),
            organization: String::new(),
            mode: String::new(),
            location: String::new(),
            latitude: None,
            longitude: None,
            tech_stack: stack.iter().map(|s| s.to_string()).collect(),
            created_by: String::new(),
            accepted_participants: vec![],
            registration_start: None,
            registration_end: None,
        }
    }

    fn candidate(id: &str, skills: &[(&str, u32)]) -> Candidate {
        Candidate {
            id: id.to_string(),
            username: id.to_string(),
            display_name: None,
            bio: None,
            skills: skills.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
        }
    }

    #[test]
    fn test_scores_overlap_and_normalizes() {
        let event = event(&["React", "Node.js"]);
        let alice = candidate("alice", &[("react", 50), ("node.js", 30)]);

        let result = SkillOverlapScorer::new().score_candidates(&event, &[alice]);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].score, 8.0);
        // Matched skills come back in the event's spelling
        assert_eq!(result[0].matched_skills, vec!["React", "Node.js"]);
    }

    #[test]
    fn test_score_capped_at_100() {
        let event = event(&["React"]);
        let heavy = candidate("heavy", &[("react", 5000)]);

        let result = SkillOverlapScorer::new().score_candidates(&event, &[heavy]);
        assert_eq!(result[0].score, 100.0);
    }

    #[test]
    fn test_profile_without_overlap_is_excluded() {
        let event = event(&["React"]);
        let pythonista = candidate("py", &[("Python", 10)]);
        let reactor = candidate("re", &[("React", 10)]);

        let result = SkillOverlapScorer::new().score_candidates(&event, &[pythonista, reactor]);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].candidate_id, "re");
    }

    #[test]
    fn test_no_profile_becomes_single_backup() {
        let event = event(&["React"]);
        let no_data_1 = candidate("first", &[]);
        let no_data_2 = candidate("second", &[]);
        let zero_overlap = candidate("py", &[("Python", 10)]);

        let result =
            SkillOverlapScorer::new().score_candidates(&event, &[no_data_1, no_data_2, zero_overlap]);
        // Only the first backup is surfaced, with the fixed low score
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].candidate_id, "first");
        assert_eq!(result[0].score, LAST_RESORT_SCORE);
        assert!(result[0].matched_skills.is_empty());
    }

    #[test]
    fn test_scored_bucket_beats_backups() {
        let event = event(&["React"]);
        let no_data = candidate("backup", &[]);
        let scored = candidate("scored", &[("react", 20)]);

        let result = SkillOverlapScorer::new().score_candidates(&event, &[no_data, scored]);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].candidate_id, "scored");
    }

    #[test]
    fn test_empty_when_profiles_exist_but_never_match() {
        let event = event(&["React"]);
        let a = candidate("a", &[("Python", 10)]);
        let b = candidate("b", &[("Go", 3)]);

        let result = SkillOverlapScorer::new().score_candidates(&event, &[a, b]);
        assert!(result.is_empty());
    }

    #[test]
    fn test_sorted_by_score_then_skill_count() {
        let event = event(&["React", "Node.js", "Python"]);
        let strong = candidate("strong", &[("react", 100), ("node.js", 100)]);
        let weak = candidate("weak", &[("python", 10)]);

        let result = SkillOverlapScorer::new().score_candidates(&event, &[weak, strong]);
        assert_eq!(result[0].candidate_id, "strong");
        assert_eq!(result[1].candidate_id, "weak");
    }

    #[test]
    fn test_zero_weight_match_not_scored() {
        let event = event(&["React"]);
        let zero = candidate("zero", &[("react", 0)]);

        let result = SkillOverlapScorer::new().score_candidates(&event, &[zero]);
        // Matched skill but raw score 0: neither scored nor backup
        assert!(result.is_empty());
    }

    #[test]
    fn test_invalid_record_skipped_not_fatal() {
        let event = event(&["React"]);
        let mut broken = candidate("", &[("react", 10)]);
        broken.username = String::new();
        let fine = candidate("fine", &[("react", 10)]);

        let result = SkillOverlapScorer::new().score_candidates(&event, &[broken, fine]);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].candidate_id, "fine");
    }

    #[test]
    fn test_full_overlap_round_trip() {
        // Candidate keys exactly the required list, case/whitespace shifted
        let event = event(&["React", "Node JS"]);
        let exact = candidate("exact", &[("react", 5), ("nodejs", 5)]);

        let result = SkillOverlapScorer::new().score_candidates(&event, &[exact]);
        assert_eq!(result[0].matched_skills, vec!["React", "Node JS"]);
    }
}
