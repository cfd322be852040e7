use std::collections::{HashMap, HashSet};

use crate::core::normalize::normalize_tech;
use crate::models::{Event, ProficiencyMapping, ScoredEvent};

/// Rank events for a participant by tech-stack overlap and proficiency.
///
/// For each event, `match_count` is the number of distinct required
/// technologies (after normalization) present in the participant's mapping,
/// and `proficiency_score` is the sum of the participant's weights over those
/// matched technologies. Events are sorted by match count then proficiency
/// score, both descending; the sort is stable, so events tied on both keys
/// keep their input order. Only events with a positive proficiency score are
/// returned.
///
/// An empty proficiency mapping means no ranking is possible and yields an
/// empty result rather than an error.
pub fn rank_events(proficiency: &ProficiencyMapping, events: Vec<Event>) -> Vec<ScoredEvent> {
    if proficiency.is_empty() {
        return Vec::new();
    }

    // Normalized skill name -> weight; on collision the larger weight wins so
    // "React" and "react " in one profile never undercount.
    let mut normalized_weights: HashMap<String, u32> = HashMap::new();
    for (name, weight) in proficiency {
        let key = normalize_tech(name);
        let entry = normalized_weights.entry(key).or_insert(0);
        *entry = (*entry).max(*weight);
    }

    let mut scored: Vec<ScoredEvent> = events
        .into_iter()
        .map(|event| {
            let (match_count, proficiency_score) = score_event(&event, &normalized_weights);
            ScoredEvent {
                event,
                match_count,
                proficiency_score,
            }
        })
        .collect();

    // Vec::sort_by is stable; ties on both keys preserve input order.
    scored.sort_by(|a, b| {
        b.match_count.cmp(&a.match_count).then_with(|| {
            b.proficiency_score
                .partial_cmp(&a.proficiency_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    });

    scored
        .into_iter()
        .filter(|s| s.proficiency_score > 0.0)
        .collect()
}

/// Match count and summed proficiency for one event. Each distinct required
/// technology counts at most once, so duplicated stack entries do not
/// inflate either number.
fn score_event(event: &Event, normalized_weights: &HashMap<String, u32>) -> (u32, f64) {
    let mut seen: HashSet<String> = HashSet::new();
    let mut match_count = 0u32;
    let mut total = 0.0f64;

    for tech in &event.tech_stack {
        let key = normalize_tech(tech);
        if key.is_empty() || !seen.insert(key.clone()) {
            continue;
        }
        if let Some(weight) = normalized_weights.get(&key) {
            match_count += 1;
            total += f64::from(*weight);
        }
    }

    (match_count, total)
}
