//! Background worker against a live tokio runtime.

mod common;

use std::sync::Arc;
use std::time::Duration;

use talent_core::{InteractionType, TalentConfig};
use talent_embeddings::EmbeddingIndex;
use talent_engine::{BackgroundWorker, MatchingEngine};
use talent_storage::StorageEngine;

use common::{engine_with, feedback_round, seeded_repository, FlakyLedger};

async fn wait_for(mut check: impl FnMut() -> bool) -> bool {
    for _ in 0..200 {
        if check() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(25)).await;
    }
    check()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn feedback_triggers_background_retrain() {
    let engine = Arc::new(engine_with(TalentConfig::default()));
    let worker = BackgroundWorker::spawn(engine.clone());

    feedback_round(&engine);
    let trained = wait_for(|| engine.get_current_weights().is_learned()).await;
    worker.shutdown().await;

    assert!(trained, "worker never published learned weights");
    engine.get_current_weights().weights().validate().unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn worker_drains_failed_writes() {
    let mut config = TalentConfig::default();
    config.storage.retry_base_delay_ms = 10;
    let storage = Arc::new(StorageEngine::open_in_memory().unwrap());
    let ledger = Arc::new(FlakyLedger::new(storage.clone(), 2));
    let index = Arc::new(EmbeddingIndex::new(config.embeddings.clone()));
    let engine = Arc::new(
        MatchingEngine::from_parts(config, seeded_repository(), ledger, storage, index).unwrap(),
    );
    let worker = BackgroundWorker::spawn(engine.clone());

    let receipt =
        engine.record_interaction("job-data", "cand-02", "rec-1", InteractionType::Hire, None);
    assert!(!receipt.persisted);

    let drained = wait_for(|| engine.pending_writes() == 0).await;
    worker.shutdown().await;
    assert!(drained);
    assert_eq!(engine.get_learning_metrics().unwrap().total_interactions, 1);
}

#[tokio::test]
async fn shutdown_is_prompt() {
    let engine = Arc::new(engine_with(TalentConfig::default()));
    let worker = BackgroundWorker::spawn(engine);
    tokio::time::timeout(Duration::from_secs(5), worker.shutdown())
        .await
        .unwrap();
}
