use serde::{Deserialize, Serialize};

use super::defaults;

/// Scoring engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Weight for the semantic term when no learned weights exist.
    pub default_semantic_weight: f64,
    /// Weight for the skill overlap term when no learned weights exist.
    pub default_skill_weight: f64,
    /// Weight for the experience term when no learned weights exist.
    pub default_experience_weight: f64,
    /// Result count used when a search does not specify `k`.
    pub default_top_k: usize,
    /// Upper bound on `k` accepted by a search.
    pub max_top_k: usize,
    /// Candidate pool size above which the ANN prefilter kicks in.
    pub ann_prefilter_threshold: usize,
    /// Number of nearest neighbours kept by the ANN prefilter.
    pub ann_prefilter_limit: usize,
    /// Worker threads for ranking. 0 uses the global rayon pool.
    pub threads: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            default_semantic_weight: defaults::DEFAULT_SEMANTIC_WEIGHT,
            default_skill_weight: defaults::DEFAULT_SKILL_WEIGHT,
            default_experience_weight: defaults::DEFAULT_EXPERIENCE_WEIGHT,
            default_top_k: defaults::DEFAULT_TOP_K,
            max_top_k: defaults::DEFAULT_MAX_TOP_K,
            ann_prefilter_threshold: defaults::DEFAULT_ANN_PREFILTER_THRESHOLD,
            ann_prefilter_limit: defaults::DEFAULT_ANN_PREFILTER_LIMIT,
            threads: defaults::DEFAULT_SCORING_THREADS,
        }
    }
}
