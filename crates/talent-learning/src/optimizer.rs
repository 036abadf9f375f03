//! The Weight Optimizer: ledger window → reward regression → new weights.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use talent_core::config::LearningConfig;
use talent_core::errors::LearningError;
use talent_core::models::WeightSource;
use talent_core::traits::IInteractionLedger;
use talent_core::{LearningWeights, ScoreWeights, TalentResult};
use tracing::{debug, info, warn};

use crate::dataset::{TrainingReport, TrainingSet};
use crate::ridge;
use crate::store::WeightStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    InsufficientData { available: usize, required: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub enum RetrainOutcome {
    /// New weights were fitted and published.
    Trained(Arc<LearningWeights>),
    /// The data gate held; the current weights stay in force.
    Skipped {
        reason: SkipReason,
        current: Arc<LearningWeights>,
    },
    /// The training set matched the one behind the active weights.
    Unchanged(Arc<LearningWeights>),
}

impl RetrainOutcome {
    /// The weights in force after the retrain.
    pub fn weights(&self) -> &Arc<LearningWeights> {
        match self {
            Self::Trained(w) | Self::Unchanged(w) => w,
            Self::Skipped { current, .. } => current,
        }
    }

    pub fn is_trained(&self) -> bool {
        matches!(self, Self::Trained(_))
    }
}

#[derive(Debug, Clone)]
pub struct RetrainResult {
    pub outcome: RetrainOutcome,
    pub report: TrainingReport,
}

pub struct WeightOptimizer {
    config: LearningConfig,
    ledger: Arc<dyn IInteractionLedger>,
    store: Arc<WeightStore>,
    retrain_lock: Mutex<()>,
}

impl WeightOptimizer {
    pub fn new(
        config: LearningConfig,
        ledger: Arc<dyn IInteractionLedger>,
        store: Arc<WeightStore>,
    ) -> Self {
        Self {
            config,
            ledger,
            store,
            retrain_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &Arc<WeightStore> {
        &self.store
    }

    pub fn retrain(&self) -> TalentResult<RetrainResult> {
        self.retrain_at(Utc::now())
    }

    /// Retrain as of `now`. Concurrent calls are serialised. On
    /// `OptimizerFailure` nothing is published.
    pub fn retrain_at(&self, now: DateTime<Utc>) -> TalentResult<RetrainResult> {
        let _guard = self
            .retrain_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let since = now - Duration::days(self.config.training_window_days);
        let window = self
            .ledger
            .training_window(since, self.config.max_training_records)?;
        let set = TrainingSet::from_interactions(&window);
        let current = self.store.current();
        debug!(
            window = window.len(),
            usable = set.len(),
            unattributed = set.unattributed,
            "training window loaded"
        );

        if set.len() < self.config.min_interactions {
            info!(
                available = set.len(),
                required = self.config.min_interactions,
                "retrain skipped: insufficient data"
            );
            return Ok(RetrainResult {
                outcome: RetrainOutcome::Skipped {
                    reason: SkipReason::InsufficientData {
                        available: set.len(),
                        required: self.config.min_interactions,
                    },
                    current,
                },
                report: set.report(None),
            });
        }

        let fingerprint = set.fingerprint();
        if current.is_learned() && current.fingerprint.as_deref() == Some(fingerprint.as_str()) {
            debug!(version = current.version, "training set unchanged");
            return Ok(RetrainResult {
                report: set.report(None),
                outcome: RetrainOutcome::Unchanged(current),
            });
        }

        let (weights, r2) = match self.fit(&set) {
            Ok(fitted) => fitted,
            Err(e) => {
                warn!(error = %e, samples = set.len(), "retrain aborted, previous weights kept");
                return Err(e.into());
            }
        };

        let record = LearningWeights {
            version: 0,
            semantic_weight: weights.semantic,
            skill_weight: weights.skill,
            experience_weight: weights.experience,
            trained_at: Some(now),
            sample_count: set.len(),
            confidence: r2.clamp(0.0, 1.0),
            source: WeightSource::Learned,
            fingerprint: Some(fingerprint),
        };
        let published = self.store.publish(record)?;
        info!(
            version = published.version,
            semantic = published.semantic_weight,
            skill = published.skill_weight,
            experience = published.experience_weight,
            samples = published.sample_count,
            confidence = published.confidence,
            "published learned weights"
        );

        Ok(RetrainResult {
            outcome: RetrainOutcome::Trained(published),
            report: set.report(Some(r2)),
        })
    }

    fn fit(&self, set: &TrainingSet) -> Result<(ScoreWeights, f64), LearningError> {
        let fit = ridge::fit(&set.features(), &set.targets(), self.config.ridge_alpha)?;
        let weights = ScoreWeights::from_raw(fit.coefficients)?;
        weights.validate()?;
        Ok((weights, fit.r2))
    }
}
