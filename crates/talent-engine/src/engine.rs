//! [`MatchingEngine`]: owns every subsystem and exposes the collaborator API.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use chrono::{Duration, Utc};
use talent_core::constants::{
    MAX_BULK_JOBS, RECENT_INTERACTIONS_DAYS, WEIGHTS_FRESHNESS_DAYS,
    WEIGHTS_FRESHNESS_MIN_CONFIDENCE,
};
use talent_core::models::{InteractionReceipt, LearningMetrics, LearningStatus, SearchResponse};
use talent_core::traits::{ICandidateRepository, IInteractionLedger, IWeightRepository};
use talent_core::{
    Candidate, InteractionType, Job, LearningWeights, RecruiterInteraction, ScoreWeights,
    TalentConfig, TalentError, TalentResult,
};
use talent_embeddings::EmbeddingIndex;
use talent_learning::{RetrainResult, RetrainTrigger, RewardPolicy, WeightOptimizer, WeightStore};
use talent_scoring::ScoringEngine;
use talent_session::SessionCache;
use talent_storage::StorageEngine;
use tokio::sync::Notify;
use tracing::{debug, info, warn};

use crate::ledger_writer::{DrainReport, LedgerWriter};
use crate::{interaction_span, retrain_span, search_span};

pub struct MatchingEngine {
    config: TalentConfig,
    repository: Arc<dyn ICandidateRepository>,
    index: Arc<EmbeddingIndex>,
    index_path: Option<PathBuf>,
    scoring: ScoringEngine,
    sessions: SessionCache,
    ledger: Arc<dyn IInteractionLedger>,
    writer: LedgerWriter,
    optimizer: WeightOptimizer,
    rewards: RewardPolicy,
    trigger: RetrainTrigger,
    retrain_requested: AtomicBool,
    retrain_notify: Notify,
}

impl MatchingEngine {
    /// File-backed engine: SQLite at `storage.db_path`, index at
    /// `embeddings.index_path`.
    pub fn open(
        config: TalentConfig,
        repository: Arc<dyn ICandidateRepository>,
    ) -> TalentResult<Self> {
        config.validate()?;
        let storage = Arc::new(StorageEngine::open(
            Path::new(&config.storage.db_path),
            &config.storage,
        )?);
        let index_path = PathBuf::from(&config.embeddings.index_path);
        let index = Arc::new(EmbeddingIndex::load(&index_path, config.embeddings.clone())?);
        let mut engine = Self::from_parts(config, repository, storage.clone(), storage, index)?;
        engine.index_path = Some(index_path);
        Ok(engine)
    }

    /// Everything in memory. Nothing survives the process.
    pub fn in_memory(
        config: TalentConfig,
        repository: Arc<dyn ICandidateRepository>,
    ) -> TalentResult<Self> {
        config.validate()?;
        let storage = Arc::new(StorageEngine::open_in_memory()?);
        let index = Arc::new(EmbeddingIndex::new(config.embeddings.clone()));
        Self::from_parts(config, repository, storage.clone(), storage, index)
    }

    /// Assemble from explicit collaborators.
    pub fn from_parts(
        config: TalentConfig,
        repository: Arc<dyn ICandidateRepository>,
        ledger: Arc<dyn IInteractionLedger>,
        weights: Arc<dyn IWeightRepository>,
        index: Arc<EmbeddingIndex>,
    ) -> TalentResult<Self> {
        let defaults = ScoreWeights::new(
            config.scoring.default_semantic_weight,
            config.scoring.default_skill_weight,
            config.scoring.default_experience_weight,
        )?;
        let store = Arc::new(WeightStore::open(weights, defaults)?);
        let optimizer = WeightOptimizer::new(config.learning.clone(), ledger.clone(), store);
        let engine = Self {
            scoring: ScoringEngine::new(&config.scoring)?,
            sessions: SessionCache::new(&config.session),
            writer: LedgerWriter::new(ledger.clone(), &config.storage),
            rewards: RewardPolicy::new(config.learning.reward.clone()),
            trigger: RetrainTrigger::new(&config.learning),
            index_path: None,
            retrain_requested: AtomicBool::new(false),
            retrain_notify: Notify::new(),
            config,
            repository,
            index,
            ledger,
            optimizer,
        };
        info!(
            version = talent_core::constants::VERSION,
            weights_version = engine.optimizer.store().current().version,
            "matching engine ready"
        );
        Ok(engine)
    }

    pub fn config(&self) -> &TalentConfig {
        &self.config
    }

    pub fn sessions(&self) -> &SessionCache {
        &self.sessions
    }

    pub fn index(&self) -> &Arc<EmbeddingIndex> {
        &self.index
    }

    // --- Search ---

    /// Rank the candidate pool against `job_id`.
    ///
    /// `k` defaults to `scoring.default_top_k` and is capped at
    /// `scoring.max_top_k`. A fresh session id is generated when none is
    /// given. `blind_mode` is only recorded in the session cache.
    pub fn search(
        &self,
        job_id: &str,
        k: Option<usize>,
        blind_mode: bool,
        session_id: Option<&str>,
    ) -> TalentResult<SearchResponse> {
        let k = self.resolve_k(k)?;
        let span = search_span!(job_id, k);
        let _entered = span.enter();
        let started = Instant::now();

        let job = self
            .repository
            .get_job(job_id)?
            .ok_or_else(|| TalentError::invalid_job(job_id, "job not found"))?;
        let weights = self.optimizer.store().current().weights();
        let pool = self.candidate_pool(&job, self.repository.list_candidates()?);
        let outcome = self.scoring.rank_candidates(&job, &pool, k, &weights)?;

        let session_id = session_id
            .map(str::to_string)
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        self.sessions
            .put_ranking(&session_id, &outcome.matches, &weights, blind_mode);

        let search_time_ms = started.elapsed().as_millis() as u64;
        info!(
            session_id = %session_id,
            searched = pool.len(),
            returned = outcome.matches.len(),
            skipped = outcome.skipped,
            missing_embeddings = outcome.missing_embeddings,
            search_time_ms,
            "search complete"
        );

        Ok(SearchResponse {
            session_id,
            job_id: job.id,
            matches: outcome.matches,
            total_candidates_searched: pool.len(),
            skipped_candidates: outcome.skipped,
            missing_embeddings: outcome.missing_embeddings,
            search_time_ms,
            weights_used: weights,
            blind_mode,
        })
    }

    /// One search per job under a shared session id. A failing job only
    /// fails its own slot.
    pub fn search_bulk(
        &self,
        job_ids: &[String],
        k: Option<usize>,
        blind_mode: bool,
    ) -> TalentResult<Vec<(String, TalentResult<SearchResponse>)>> {
        if job_ids.is_empty() || job_ids.len() > MAX_BULK_JOBS {
            return Err(TalentError::InvalidRequest {
                reason: format!(
                    "bulk search takes 1..={MAX_BULK_JOBS} jobs, got {}",
                    job_ids.len()
                ),
            });
        }
        let session_id = uuid::Uuid::new_v4().to_string();
        Ok(job_ids
            .iter()
            .map(|job_id| {
                let result = self.search(job_id, k, blind_mode, Some(&session_id));
                if let Err(e) = &result {
                    warn!(job_id = %job_id, error = %e, "bulk search entry failed");
                }
                (job_id.clone(), result)
            })
            .collect())
    }

    fn resolve_k(&self, k: Option<usize>) -> TalentResult<usize> {
        let scoring = &self.config.scoring;
        match k.unwrap_or(scoring.default_top_k) {
            0 => Err(TalentError::InvalidRequest {
                reason: "k must be at least 1".to_string(),
            }),
            k if k > scoring.max_top_k => {
                debug!(requested = k, max = scoring.max_top_k, "clamping k");
                Ok(scoring.max_top_k)
            }
            k => Ok(k),
        }
    }

    /// Above the prefilter threshold, keep the ANN neighbours of the job plus
    /// every candidate the index cannot speak for.
    fn candidate_pool(&self, job: &Job, all: Vec<Candidate>) -> Vec<Candidate> {
        let scoring = &self.config.scoring;
        if all.len() <= scoring.ann_prefilter_threshold {
            return all;
        }
        let query = match job.embedding.as_deref() {
            Some(query) if job.has_embedding() => query,
            _ => return all,
        };
        let hits = match self.index.nearest(query, scoring.ann_prefilter_limit) {
            Ok(hits) if hits.is_empty() => return all,
            Ok(hits) => hits,
            Err(e) => {
                warn!(job_id = %job.id, error = %e, "ann prefilter failed, scoring full pool");
                return all;
            }
        };
        let ids: Vec<&str> = all.iter().map(|c| c.id.as_str()).collect();
        let indexed = match self.index.contains_all(&ids) {
            Ok(indexed) => indexed,
            Err(e) => {
                warn!(job_id = %job.id, error = %e, "ann prefilter failed, scoring full pool");
                return all;
            }
        };
        let keep: HashSet<String> = hits.into_iter().map(|(id, _)| id).collect();
        let before = all.len();
        let pool: Vec<Candidate> = all
            .into_iter()
            .zip(indexed)
            .filter(|(c, in_index)| keep.contains(&c.id) || !c.has_embedding() || !in_index)
            .map(|(c, _)| c)
            .collect();
        debug!(job_id = %job.id, before, after = pool.len(), "ann prefilter applied");
        pool
    }

    // --- Embedding index maintenance ---

    /// Mirror one candidate's embedding into the index.
    pub fn index_candidate(&self, candidate: &Candidate) -> TalentResult<()> {
        match candidate.embedding.as_deref() {
            Some(vector) if candidate.has_embedding() => self.index.upsert(&candidate.id, vector),
            _ => self.index.remove(&candidate.id).map(|_| ()),
        }
    }

    /// Index every candidate in the repository. Returns how many were
    /// indexed; rejected vectors are logged and skipped.
    pub fn reindex_candidates(&self) -> TalentResult<usize> {
        let mut indexed = 0;
        for candidate in self.repository.list_candidates()? {
            if !candidate.has_embedding() {
                continue;
            }
            match self.index_candidate(&candidate) {
                Ok(()) => indexed += 1,
                Err(e) => warn!(candidate_id = %candidate.id, error = %e, "embedding not indexed"),
            }
        }
        info!(indexed, "candidate embeddings indexed");
        Ok(indexed)
    }

    /// Persist the index when the engine is file-backed.
    pub fn save_index(&self) -> TalentResult<()> {
        match &self.index_path {
            Some(path) => self.index.save(path),
            None => Ok(()),
        }
    }

    // --- Interactions ---

    /// Record a recruiter action. Never fails: attribution degrades on a
    /// cache miss, and a failed append is queued for retry.
    pub fn record_interaction(
        &self,
        job_id: &str,
        candidate_id: &str,
        recruiter_id: &str,
        interaction_type: InteractionType,
        session_id: Option<&str>,
    ) -> InteractionReceipt {
        let span = interaction_span!(job_id, candidate_id, interaction_type);
        let _entered = span.enter();

        let context = session_id.and_then(|s| self.sessions.get(s, job_id, candidate_id));
        let (rank, scores) = match &context {
            Some(entry) => (Some(entry.rank), Some(entry.breakdown.components())),
            None => {
                info!(session_id = ?session_id, "interaction recorded without ranking context");
                (None, None)
            }
        };
        let reward = self.rewards.reward(interaction_type, rank);

        let interaction = RecruiterInteraction {
            id: uuid::Uuid::new_v4().to_string(),
            job_id: job_id.to_string(),
            candidate_id: candidate_id.to_string(),
            recruiter_id: recruiter_id.to_string(),
            session_id: session_id.map(str::to_string),
            interaction_type,
            search_rank_at_time: rank,
            original_scores_at_time: scores,
            reward,
            timestamp: Utc::now(),
        };
        let interaction_id = interaction.id.clone();
        let attributed = interaction.is_attributed();
        let persisted = self.writer.write(interaction);
        if persisted {
            self.check_feedback_trigger();
        }
        debug!(%interaction_id, attributed, reward, persisted, "interaction accepted");

        InteractionReceipt {
            interaction_id,
            accepted: true,
            attributed,
            reward,
            persisted,
        }
    }

    fn check_feedback_trigger(&self) {
        match self.ledger.count() {
            Ok(total) if self.trigger.after_interaction(total) => {
                debug!(total, "feedback retrain requested");
                self.retrain_requested.store(true, Ordering::Release);
                self.retrain_notify.notify_one();
            }
            Ok(_) => {}
            Err(e) => warn!(error = %e, "could not count ledger for retrain trigger"),
        }
    }

    /// Retry queued ledger writes that are due.
    pub fn flush_pending_writes(&self) -> DrainReport {
        self.writer.drain_due(Instant::now())
    }

    pub fn pending_writes(&self) -> usize {
        self.writer.pending_len()
    }

    pub(crate) fn writer(&self) -> &LedgerWriter {
        &self.writer
    }

    // --- Learning ---

    pub fn get_current_weights(&self) -> LearningWeights {
        self.optimizer.store().current().as_ref().clone()
    }

    /// Administrative retrain. Returns the weights in force afterwards.
    pub fn retrain_now(&self) -> TalentResult<LearningWeights> {
        Ok(self.retrain_with_report("manual")?.outcome.weights().as_ref().clone())
    }

    /// Retrain and return the full outcome with its training report.
    pub fn retrain_with_report(&self, trigger: &'static str) -> TalentResult<RetrainResult> {
        let span = retrain_span!(trigger);
        let _entered = span.enter();
        self.optimizer.retrain()
    }

    /// Run a retrain if feedback asked for one since the last call.
    pub fn run_requested_retrain(&self) -> TalentResult<Option<RetrainResult>> {
        if !self.retrain_requested.swap(false, Ordering::AcqRel) {
            return Ok(None);
        }
        self.retrain_with_report("feedback").map(Some)
    }

    /// Run a retrain if enough new interactions arrived since the last one.
    pub fn run_scheduled_retrain(&self) -> TalentResult<Option<RetrainResult>> {
        let current = self.optimizer.store().current();
        if !self
            .trigger
            .scheduled(self.ledger.as_ref(), &current, Utc::now())?
        {
            debug!("scheduled retrain not due");
            return Ok(None);
        }
        self.retrain_with_report("scheduled").map(Some)
    }

    pub(crate) fn retrain_notify(&self) -> &Notify {
        &self.retrain_notify
    }

    pub fn weights_history(&self, limit: usize) -> TalentResult<Vec<LearningWeights>> {
        self.optimizer.store().history(limit)
    }

    pub fn get_learning_metrics(&self) -> TalentResult<LearningMetrics> {
        let now = Utc::now();
        let current = self.optimizer.store().current();
        let learning_status = if current.is_learned() {
            LearningStatus::Trained
        } else {
            LearningStatus::InsufficientData
        };
        Ok(LearningMetrics {
            total_interactions: self.ledger.count()?,
            recent_interactions: self
                .ledger
                .count_since(now - Duration::days(RECENT_INTERACTIONS_DAYS))?,
            attributed_interactions: self.ledger.count_attributed()?,
            per_type_breakdown: self.ledger.breakdown_by_type()?,
            learning_status,
            weights_fresh: current.is_fresh(
                now,
                WEIGHTS_FRESHNESS_DAYS,
                WEIGHTS_FRESHNESS_MIN_CONFIDENCE,
            ),
            current_weights: current.as_ref().clone(),
            pending_ledger_writes: self.writer.pending_len(),
        })
    }

    /// Drop expired session entries now.
    pub fn sweep_sessions(&self) -> usize {
        self.sessions.sweep()
    }
}
