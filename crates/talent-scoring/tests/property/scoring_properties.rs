//! Property tests: component bounds and the defined edge values.

use proptest::prelude::*;
use talent_core::config::ScoringConfig;
use talent_core::{Candidate, Job, ScoreWeights};
use talent_scoring::ScoringEngine;

fn skill() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["Rust", "rust", "Go", "SQL", "  sql ", "Python", "AWS"])
        .prop_map(str::to_string)
}

proptest! {
    #[test]
    fn prop_empty_requirements_score_full_overlap(
        skills in prop::collection::vec(skill(), 0..5),
        years in 0.0f64..30.0,
    ) {
        let engine = ScoringEngine::new(&ScoringConfig::default()).unwrap();
        let job = Job::new("j", vec![], 0.0);
        let cand = Candidate::new("c", skills, years);
        let r = engine.score(&job, &cand, &ScoreWeights::default()).unwrap();
        prop_assert_eq!(r.breakdown.skill_overlap_score, 1.0);
    }

    #[test]
    fn prop_meeting_minimum_scores_full_experience(
        min in 0.0f64..20.0,
        extra in 0.0f64..20.0,
    ) {
        let engine = ScoringEngine::new(&ScoringConfig::default()).unwrap();
        let job = Job::new("j", vec!["Rust".into()], min);
        let cand = Candidate::new("c", vec![], min + extra);
        let r = engine.score(&job, &cand, &ScoreWeights::default()).unwrap();
        prop_assert_eq!(r.breakdown.experience_match_score, 1.0);
    }

    #[test]
    fn prop_components_and_total_in_unit_interval(
        req in prop::collection::vec(skill(), 0..4),
        have in prop::collection::vec(skill(), 0..4),
        min in 0.0f64..10.0,
        years in 0.0f64..10.0,
        je in prop::collection::vec(-1.0f32..1.0, 3),
        ce in prop::collection::vec(-1.0f32..1.0, 3),
    ) {
        let engine = ScoringEngine::new(&ScoringConfig::default()).unwrap();
        let job = Job::new("j", req, min).with_embedding(je);
        let cand = Candidate::new("c", have, years).with_embedding(ce);
        let r = engine.score(&job, &cand, &ScoreWeights::default()).unwrap();
        for v in [r.breakdown.semantic_score, r.breakdown.skill_overlap_score, r.breakdown.experience_match_score, r.total_score] {
            prop_assert!((0.0..=1.0 + 1e-12).contains(&v));
        }
    }

    #[test]
    fn prop_rank_returns_min_of_k_and_pool(
        n in 0usize..40,
        k in 0usize..50,
    ) {
        let engine = ScoringEngine::new(&ScoringConfig::default()).unwrap();
        let job = Job::new("j", vec!["Go".into()], 2.0);
        let pool: Vec<Candidate> = (0..n)
            .map(|i| Candidate::new(format!("c{i}"), vec!["go".into()], (i % 5) as f64))
            .collect();
        let out = engine.rank_candidates(&job, &pool, k, &ScoreWeights::default()).unwrap();
        prop_assert_eq!(out.matches.len(), n.min(k));
        for pair in out.matches.windows(2) {
            prop_assert!(pair[0].total_score >= pair[1].total_score);
        }
    }
}
