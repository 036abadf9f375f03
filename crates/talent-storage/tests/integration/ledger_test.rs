use chrono::{Duration, Utc};

use talent_core::config::StorageConfig;
use talent_core::errors::{StorageError, TalentError};
use talent_core::traits::IInteractionLedger;
use talent_core::{ComponentScores, InteractionType, RecruiterInteraction};
use talent_storage::{to_storage_err, StorageEngine};

fn interaction(kind: InteractionType, rank: Option<u32>, age_days: i64) -> RecruiterInteraction {
    RecruiterInteraction {
        id: uuid::Uuid::new_v4().to_string(),
        job_id: "job-1".into(),
        candidate_id: "cand-1".into(),
        recruiter_id: "rec-1".into(),
        session_id: Some("sess-1".into()),
        interaction_type: kind,
        search_rank_at_time: rank,
        original_scores_at_time: rank.map(|_| ComponentScores {
            semantic: 0.7,
            skill_overlap: 0.5,
            experience: 1.0,
        }),
        reward: 0.3,
        timestamp: Utc::now() - Duration::days(age_days),
    }
}

#[test]
fn append_and_read_back() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let original = interaction(InteractionType::Interview, Some(3), 0);
    engine.append(&original).unwrap();

    let window = engine
        .training_window(Utc::now() - Duration::days(1), 10)
        .unwrap();
    assert_eq!(window.len(), 1);
    let got = &window[0];
    assert_eq!(got.id, original.id);
    assert_eq!(got.interaction_type, InteractionType::Interview);
    assert_eq!(got.search_rank_at_time, Some(3));
    assert_eq!(got.original_scores_at_time, original.original_scores_at_time);
    assert!((got.timestamp - original.timestamp).num_milliseconds().abs() < 1);
}

#[test]
fn unattributed_interactions_keep_null_rank() {
    let engine = StorageEngine::open_in_memory().unwrap();
    engine.append(&interaction(InteractionType::View, None, 0)).unwrap();
    let window = engine.training_window(Utc::now() - Duration::days(1), 10).unwrap();
    assert!(!window[0].is_attributed());
    assert_eq!(engine.count_attributed().unwrap(), 0);
    assert_eq!(engine.count().unwrap(), 1);
}

#[test]
fn duplicate_append_is_ignored() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let i = interaction(InteractionType::Hire, Some(1), 0);
    engine.append(&i).unwrap();
    engine.append(&i).unwrap();
    assert_eq!(engine.count().unwrap(), 1);
}

#[test]
fn ledger_rejects_update_and_delete() {
    let engine = StorageEngine::open_in_memory().unwrap();
    engine.append(&interaction(InteractionType::View, Some(2), 0)).unwrap();

    let update = engine.pool().writer.with_conn(|conn| {
        conn.execute("UPDATE interaction_ledger SET reward = 99", [])
            .map_err(|e| to_storage_err(e.to_string()))
    });
    assert!(matches!(
        update,
        Err(TalentError::StorageError(StorageError::AppendOnlyViolation { ref operation }))
            if operation.contains("UPDATE")
    ));

    let delete = engine.pool().writer.with_conn(|conn| {
        conn.execute("DELETE FROM interaction_ledger", [])
            .map_err(|e| to_storage_err(e.to_string()))
    });
    assert!(matches!(
        delete,
        Err(TalentError::StorageError(StorageError::AppendOnlyViolation { .. }))
    ));
    assert_eq!(engine.count().unwrap(), 1);
}

#[test]
fn training_window_respects_since_and_limit() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let old = interaction(InteractionType::Hire, Some(1), 40);
    engine.append(&old).unwrap();
    let mut recent_ids = Vec::new();
    for _ in 0..5 {
        let i = interaction(InteractionType::Shortlist, Some(2), 1);
        recent_ids.push(i.id.clone());
        engine.append(&i).unwrap();
    }

    let window = engine.training_window(Utc::now() - Duration::days(30), 3).unwrap();
    let ids: Vec<String> = window.into_iter().map(|i| i.id).collect();
    // Newest three, returned oldest first.
    assert_eq!(ids, recent_ids[2..].to_vec());
    assert_eq!(engine.count_since(Utc::now() - Duration::days(7)).unwrap(), 5);
}

#[test]
fn breakdown_groups_by_type() {
    let engine = StorageEngine::open_in_memory().unwrap();
    for _ in 0..3 {
        engine.append(&interaction(InteractionType::View, Some(1), 0)).unwrap();
    }
    let mut hire = interaction(InteractionType::Hire, Some(1), 0);
    hire.reward = 1.2;
    engine.append(&hire).unwrap();

    let breakdown = engine.breakdown_by_type().unwrap();
    assert_eq!(breakdown[&InteractionType::View].count, 3);
    assert!((breakdown[&InteractionType::View].avg_reward - 0.3).abs() < 1e-9);
    assert!((breakdown[&InteractionType::Hire].avg_reward - 1.2).abs() < 1e-9);
    assert!(!breakdown.contains_key(&InteractionType::Reject));
}

#[test]
fn file_backed_reads_see_writes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("talent.db");
    let engine = StorageEngine::open(&path, &StorageConfig::default()).unwrap();
    for _ in 0..4 {
        engine.append(&interaction(InteractionType::Application, Some(5), 0)).unwrap();
    }
    // Round-robin over every reader.
    for _ in 0..8 {
        assert_eq!(engine.count().unwrap(), 4);
    }
    drop(engine);

    let reopened = StorageEngine::open(&path, &StorageConfig::default()).unwrap();
    assert_eq!(reopened.count().unwrap(), 4);
}
