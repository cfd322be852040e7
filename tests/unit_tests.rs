// Unit tests for HackMatch Algo

use hackmatch_algo::core::{
    distance::haversine_distance, nearby_events, rank_events, recommender::last_resort,
    SkillOverlapScorer,
};
use hackmatch_algo::models::{Candidate, Event, ProficiencyMapping};

fn make_event(id: &str, stack: &[&str], coords: Option<(f64, f64)>) -> Event {
    Event {
        id: id.to_string(),
        title: format!("Event {}", id),
        theme: "Open Innovation".to_string(),
        organization: "Acme".to_string(),
        mode: "hybrid".to_string(),
        location: "Bengaluru".to_string(),
        latitude: coords.map(|c| c.0),
        longitude: coords.map(|c| c.1),
        tech_stack: stack.iter().map(|s| s.to_string()).collect(),
        created_by: String::new(),
        accepted_participants: vec![],
        registration_start: None,
        registration_end: None,
    }
}

fn make_candidate(id: &str, skills: &[(&str, u32)]) -> Candidate {
    Candidate {
        id: id.to_string(),
        username: format!("user_{}", id),
        display_name: None,
        bio: None,
        skills: skills.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
    }
}

#[test]
fn test_haversine_zero_at_origin() {
    assert_eq!(haversine_distance(0.0, 0.0, 0.0, 0.0), 0.0);
}

#[test]
fn test_haversine_zero_at_any_identical_point() {
    for &(lat, lon) in &[(12.97, 77.59), (-33.86, 151.2), (51.5, -0.12)] {
        assert!(haversine_distance(lat, lon, lat, lon).abs() < 1e-9);
    }
}

#[test]
fn test_rank_events_empty_mapping_is_empty() {
    let events = vec![
        make_event("1", &["React"], None),
        make_event("2", &["Python"], None),
    ];
    assert!(rank_events(&ProficiencyMapping::new(), events).is_empty());
}

#[test]
fn test_rank_events_sorted_and_positive_only() {
    let profile: ProficiencyMapping = [
        ("react".to_string(), 5u32),
        ("node.js".to_string(), 3u32),
        ("go".to_string(), 7u32),
    ]
    .into_iter()
    .collect();

    let events = vec![
        make_event("go_only", &["Go"], None),
        make_event("full_stack", &["React", "Node.js"], None),
        make_event("rust_only", &["Rust"], None),
        make_event("react_only", &["React"], None),
    ];

    let ranked = rank_events(&profile, events);

    // Sorted descending by (match_count, proficiency_score)
    for pair in ranked.windows(2) {
        let key = |s: &hackmatch_algo::ScoredEvent| (s.match_count, s.proficiency_score);
        assert!(key(&pair[0]) >= key(&pair[1]));
    }

    // Only positive scores survive
    assert!(ranked.iter().all(|s| s.proficiency_score > 0.0));
    assert!(!ranked.iter().any(|s| s.event.id == "rust_only"));

    let ids: Vec<&str> = ranked.iter().map(|s| s.event.id.as_str()).collect();
    assert_eq!(ids, vec!["full_stack", "go_only", "react_only"]);
}

#[test]
fn test_rank_events_worked_example() {
    // Event requires ["React","Node.js"]; A has {"react":5,"node.js":3},
    // B has {"Python":10}
    let a: ProficiencyMapping = [("react".to_string(), 5u32), ("node.js".to_string(), 3u32)]
        .into_iter()
        .collect();
    let b: ProficiencyMapping = [("Python".to_string(), 10u32)].into_iter().collect();

    let ranked_a = rank_events(&a, vec![make_event("e", &["React", "Node.js"], None)]);
    assert_eq!(ranked_a[0].match_count, 2);
    assert_eq!(ranked_a[0].proficiency_score, 8.0);

    let ranked_b = rank_events(&b, vec![make_event("e", &["React", "Node.js"], None)]);
    assert!(ranked_b.is_empty());
}

#[test]
fn test_nearby_excludes_far_and_coordless_events() {
    let events = vec![
        make_event("bangalore", &[], Some((12.9716, 77.5946))),
        make_event("mysore", &[], Some((12.2958, 76.6394))), // ~130 km away
        make_event("nowhere", &[], None),
    ];

    let result = nearby_events(12.97, 77.59, events, 50.0);
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].id, "bangalore");
}

#[test]
fn test_fallback_full_overlap_round_trip() {
    let event = make_event("e", &["React", "Node.js"], None);
    let candidate = make_candidate("c1", &[("REACT", 5), ("node.js", 3)]);

    let result = SkillOverlapScorer::new().score_candidates(&event, &[candidate]);
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].matched_skills, vec!["React", "Node.js"]);
}

#[test]
fn test_fallback_score_normalization() {
    let event = make_event("e", &["React"], None);
    let candidate = make_candidate("c1", &[("react", 450)]);

    let result = SkillOverlapScorer::new().score_candidates(&event, &[candidate]);
    assert_eq!(result[0].score, 45.0);
}

#[test]
fn test_last_resort_first_valid_only() {
    let candidates = vec![
        make_candidate("", &[]),
        make_candidate("c2", &[]),
        make_candidate("c3", &[]),
    ];

    let result = last_resort(&candidates);
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].candidate_id, "c2");
}
