//! When to retrain.

use chrono::{DateTime, Duration, Utc};
use talent_core::config::LearningConfig;
use talent_core::traits::IInteractionLedger;
use talent_core::{LearningWeights, TalentResult};

/// The scheduled trigger never counts interactions older than this.
const SCHEDULE_LOOKBACK_HOURS: i64 = 24;

#[derive(Debug, Clone, Copy)]
pub struct RetrainTrigger {
    min_interactions: usize,
    every: usize,
    min_new: usize,
}

impl RetrainTrigger {
    pub fn new(config: &LearningConfig) -> Self {
        Self {
            min_interactions: config.min_interactions,
            every: config.retrain_every_interactions.max(1),
            min_new: config.min_new_interactions,
        }
    }

    /// Feedback-driven: the gate is open and `total` lands on the cadence.
    pub fn after_interaction(&self, total: usize) -> bool {
        total >= self.min_interactions && total % self.every == 0
    }

    /// Scheduled: enough interactions arrived within the lookback window and
    /// after the last training.
    pub fn scheduled(
        &self,
        ledger: &dyn IInteractionLedger,
        current: &LearningWeights,
        now: DateTime<Utc>,
    ) -> TalentResult<bool> {
        Ok(ledger.count_since(Self::schedule_cutoff(current, now))? >= self.min_new)
    }

    fn schedule_cutoff(current: &LearningWeights, now: DateTime<Utc>) -> DateTime<Utc> {
        let window = now - Duration::hours(SCHEDULE_LOOKBACK_HOURS);
        match current.trained_at {
            Some(at) if current.is_learned() => at.max(window),
            _ => window,
        }
    }
}
