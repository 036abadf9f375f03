#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use talent_core::errors::StorageError;
use talent_core::models::TypeBreakdown;
use talent_core::traits::IInteractionLedger;
use talent_core::{InteractionType, RecruiterInteraction, TalentConfig, TalentResult};
use talent_engine::{InMemoryRepository, MatchingEngine};
use talent_storage::StorageEngine;

pub fn seeded_repository() -> Arc<InMemoryRepository> {
    let pool = test_fixtures::small_pool();
    let repo = Arc::new(InMemoryRepository::new());
    for job in pool.jobs {
        repo.upsert_job(job);
    }
    for candidate in pool.candidates {
        repo.upsert_candidate(candidate);
    }
    repo
}

pub fn engine_with(config: TalentConfig) -> MatchingEngine {
    MatchingEngine::in_memory(config, seeded_repository()).unwrap()
}

/// Search every job once and act on every returned candidate: strong
/// semantic matches are hired, weak ones rejected.
pub fn feedback_round(engine: &MatchingEngine) -> usize {
    let mut recorded = 0;
    for job_id in ["job-backend", "job-data", "job-open"] {
        let response = engine.search(job_id, Some(24), false, None).unwrap();
        for m in &response.matches {
            let kind = match m.breakdown.semantic_score {
                s if s >= 0.9 => InteractionType::Hire,
                s if s >= 0.75 => InteractionType::Interview,
                s if s >= 0.6 => InteractionType::View,
                _ => InteractionType::Reject,
            };
            let receipt = engine.record_interaction(
                job_id,
                &m.candidate_id,
                "rec-1",
                kind,
                Some(&response.session_id),
            );
            assert!(receipt.accepted);
            assert!(receipt.attributed);
            recorded += 1;
        }
    }
    recorded
}

/// SQLite ledger that fails the first `failures` appends.
pub struct FlakyLedger {
    inner: Arc<StorageEngine>,
    failures: usize,
    calls: AtomicUsize,
}

impl FlakyLedger {
    pub fn new(inner: Arc<StorageEngine>, failures: usize) -> Self {
        Self {
            inner,
            failures,
            calls: AtomicUsize::new(0),
        }
    }
}

impl IInteractionLedger for FlakyLedger {
    fn append(&self, interaction: &RecruiterInteraction) -> TalentResult<()> {
        if self.calls.fetch_add(1, Ordering::SeqCst) < self.failures {
            return Err(StorageError::SqliteError {
                message: "database is locked".into(),
            }
            .into());
        }
        self.inner.append(interaction)
    }
    fn count(&self) -> TalentResult<usize> {
        self.inner.count()
    }
    fn count_since(&self, since: DateTime<Utc>) -> TalentResult<usize> {
        self.inner.count_since(since)
    }
    fn count_attributed(&self) -> TalentResult<usize> {
        self.inner.count_attributed()
    }
    fn training_window(
        &self,
        since: DateTime<Utc>,
        limit: usize,
    ) -> TalentResult<Vec<RecruiterInteraction>> {
        self.inner.training_window(since, limit)
    }
    fn breakdown_by_type(&self) -> TalentResult<BTreeMap<InteractionType, TypeBreakdown>> {
        self.inner.breakdown_by_type()
    }
}
