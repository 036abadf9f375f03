//! Property tests: a cached ranking reads back exactly while live and
//! never after it has expired.

use std::time::Duration;

use proptest::prelude::*;
use talent_core::config::SessionConfig;
use talent_core::{MatchResult, ScoreBreakdown, ScoreWeights, SemanticStatus};
use talent_session::SessionCache;

fn ranking() -> impl Strategy<Value = Vec<MatchResult>> {
    prop::collection::vec((0.0f64..=1.0, 0.0f64..=1.0, 0.0f64..=1.0), 1..40).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (semantic, skill, experience))| MatchResult {
                job_id: "job".to_string(),
                candidate_id: format!("cand-{i}"),
                total_score: (semantic + skill + experience) / 3.0,
                breakdown: ScoreBreakdown {
                    semantic_score: semantic,
                    skill_overlap_score: skill,
                    experience_match_score: experience,
                    matched_skills: vec!["rust".into()],
                    missing_skills: vec![],
                    weights_used: ScoreWeights::default(),
                    semantic_status: SemanticStatus::Computed,
                },
                rank: i as u32 + 1,
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn live_entries_read_back_exactly(results in ranking(), blind in any::<bool>()) {
        let cache = SessionCache::new(&SessionConfig::default());
        let weights = ScoreWeights::default();
        cache.put_ranking("s", &results, &weights, blind);
        for m in &results {
            let entry = cache.get("s", &m.job_id, &m.candidate_id).unwrap();
            prop_assert_eq!(entry.rank, m.rank);
            prop_assert_eq!(&entry.breakdown, &m.breakdown);
            prop_assert_eq!(entry.blind_mode, blind);
        }
        prop_assert!(cache.get("s", "job", "not-ranked").is_none());
        prop_assert!(cache.get("other", "job", "cand-0").is_none());
    }

    #[test]
    fn expired_entries_never_read_back(results in ranking()) {
        let seed = SessionCache::new(&SessionConfig::default());
        seed.put_ranking("s", &results, &ScoreWeights::default(), false);
        let entries: Vec<_> = results
            .iter()
            .map(|m| seed.get("s", &m.job_id, &m.candidate_id).unwrap())
            .collect();

        let cache = SessionCache::new(&SessionConfig::default());
        cache.put("s", entries, Duration::ZERO);
        for m in &results {
            prop_assert!(cache.get("s", &m.job_id, &m.candidate_id).is_none());
        }
    }
}
