use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::interaction::InteractionType;
use super::weights::LearningWeights;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LearningStatus {
    InsufficientData,
    Trained,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TypeBreakdown {
    pub count: usize,
    pub avg_reward: f64,
}

/// Snapshot of the learning loop's state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningMetrics {
    pub total_interactions: usize,
    pub recent_interactions: usize,
    pub attributed_interactions: usize,
    pub per_type_breakdown: BTreeMap<InteractionType, TypeBreakdown>,
    pub learning_status: LearningStatus,
    pub current_weights: LearningWeights,
    pub weights_fresh: bool,
    pub pending_ledger_writes: usize,
}
