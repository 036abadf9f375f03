//! Property tests: every appended interaction reads back intact.

use chrono::{Duration, Utc};
use proptest::prelude::*;

use talent_core::traits::IInteractionLedger;
use talent_core::{ComponentScores, InteractionType, RecruiterInteraction};
use talent_storage::StorageEngine;

fn kind() -> impl Strategy<Value = InteractionType> {
    prop::sample::select(InteractionType::ALL.to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_append_roundtrip(
        kinds in prop::collection::vec(kind(), 1..20),
        rank in prop::option::of(1u32..100),
        semantic in 0.0f64..=1.0,
        reward in -1.0f64..1.5,
    ) {
        let engine = StorageEngine::open_in_memory().unwrap();
        let now = Utc::now();
        let written: Vec<RecruiterInteraction> = kinds
            .iter()
            .enumerate()
            .map(|(i, k)| RecruiterInteraction {
                id: format!("i{i}"),
                job_id: "j".into(),
                candidate_id: format!("c{i}"),
                recruiter_id: "r".into(),
                session_id: None,
                interaction_type: *k,
                search_rank_at_time: rank,
                original_scores_at_time: rank.map(|_| ComponentScores { semantic, skill_overlap: 0.5, experience: 1.0 }),
                reward,
                timestamp: now,
            })
            .collect();
        for i in &written {
            engine.append(i).unwrap();
        }
        let read = engine.training_window(now - Duration::seconds(1), 1000).unwrap();
        prop_assert_eq!(read.len(), written.len());
        for (w, r) in written.iter().zip(&read) {
            prop_assert_eq!(&w.id, &r.id);
            prop_assert_eq!(w.interaction_type, r.interaction_type);
            prop_assert_eq!(w.search_rank_at_time, r.search_rank_at_time);
            prop_assert_eq!(w.reward, r.reward);
        }
        let total: usize = engine.breakdown_by_type().unwrap().values().map(|b| b.count).sum();
        prop_assert_eq!(total, written.len());
    }
}
