use serde::{Deserialize, Serialize};

use super::score::MatchResult;
use super::weights::ScoreWeights;

/// What `search` hands back to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub session_id: String,
    pub job_id: String,
    pub matches: Vec<MatchResult>,
    pub total_candidates_searched: usize,
    pub skipped_candidates: usize,
    pub missing_embeddings: usize,
    pub search_time_ms: u64,
    pub weights_used: ScoreWeights,
    pub blind_mode: bool,
}

/// Acknowledgement for a recorded interaction. `accepted` is always true;
/// `persisted` is false when the write was queued for retry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionReceipt {
    pub interaction_id: String,
    pub accepted: bool,
    pub attributed: bool,
    pub reward: f64,
    pub persisted: bool,
}
