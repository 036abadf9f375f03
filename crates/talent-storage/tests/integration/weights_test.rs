use chrono::Utc;

use talent_core::config::StorageConfig;
use talent_core::models::WeightSource;
use talent_core::traits::IWeightRepository;
use talent_core::{LearningWeights, ScoreWeights};
use talent_storage::StorageEngine;

fn learned(semantic: f64, skill: f64, experience: f64) -> LearningWeights {
    LearningWeights {
        trained_at: Some(Utc::now()),
        sample_count: 60,
        confidence: 0.42,
        source: WeightSource::Learned,
        fingerprint: Some("abc".into()),
        ..LearningWeights::from_weights(ScoreWeights::new(semantic, skill, experience).unwrap())
    }
}

#[test]
fn publish_assigns_increasing_versions() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let v1 = engine.publish(&learned(0.5, 0.3, 0.2)).unwrap();
    let v2 = engine.publish(&learned(0.2, 0.6, 0.2)).unwrap();
    assert!(v2.version > v1.version);

    let active = engine.load_active().unwrap().unwrap();
    assert_eq!(active.version, v2.version);
    assert_eq!(active.skill_weight, 0.6);
    assert_eq!(active.source, WeightSource::Learned);
    assert_eq!(active.fingerprint.as_deref(), Some("abc"));
}

#[test]
fn history_is_newest_first_and_bounded() {
    let engine = StorageEngine::open_in_memory().unwrap();
    for i in 0..5 {
        let s = 0.1 * f64::from(i + 1);
        engine.publish(&learned(s, 1.0 - s, 0.0)).unwrap();
    }
    let history = engine.history(3).unwrap();
    assert_eq!(history.len(), 3);
    assert!(history[0].version > history[1].version);
    assert!((history[0].semantic_weight - 0.5).abs() < 1e-12);
}

#[test]
fn exactly_one_active_row() {
    let engine = StorageEngine::open_in_memory().unwrap();
    for _ in 0..3 {
        engine.publish(&learned(0.4, 0.4, 0.2)).unwrap();
    }
    let active: i64 = engine
        .pool()
        .writer
        .with_conn(|conn| {
            conn.query_row(
                "SELECT COUNT(*) FROM learning_weights WHERE is_active = 1",
                [],
                |row| row.get(0),
            )
            .map_err(|e| talent_core::errors::StorageError::SqliteError { message: e.to_string() }.into())
        })
        .unwrap();
    assert_eq!(active, 1);
}

#[test]
fn active_weights_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("talent.db");
    {
        let engine = StorageEngine::open(&path, &StorageConfig::default()).unwrap();
        engine.publish(&learned(0.3, 0.3, 0.4)).unwrap();
    }
    let engine = StorageEngine::open(&path, &StorageConfig::default()).unwrap();
    let active = engine.load_active().unwrap().unwrap();
    assert_eq!(active.experience_weight, 0.4);
}
