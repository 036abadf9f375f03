use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::score::ScoreBreakdown;
use super::weights::ScoreWeights;

/// Ranking context for one candidate shown in one search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchSessionCacheEntry {
    pub session_id: String,
    pub job_id: String,
    pub candidate_id: String,
    pub rank: u32,
    pub breakdown: ScoreBreakdown,
    pub weights_used: ScoreWeights,
    /// Recorded for audit only.
    pub blind_mode: bool,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl SearchSessionCacheEntry {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}
