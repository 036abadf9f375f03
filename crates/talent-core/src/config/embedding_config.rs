use serde::{Deserialize, Serialize};

use super::defaults;

/// Embedding index configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Path to the SQLite file used to persist the index.
    pub index_path: String,
    /// Number of hash tables in the ANN index.
    pub ann_tables: usize,
    /// Hyperplane bits per table (bucket signature width).
    pub ann_bits: usize,
    /// Seed for the deterministic hyperplanes.
    pub ann_seed: u64,
    /// Pending upserts that trigger a compaction of the hash tables.
    pub rebuild_threshold: usize,
    /// When bucket probing yields fewer than `k * factor` candidates,
    /// `nearest` falls back to an exact scan.
    pub min_candidates_factor: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            index_path: defaults::DEFAULT_INDEX_FILENAME.to_string(),
            ann_tables: defaults::DEFAULT_ANN_TABLES,
            ann_bits: defaults::DEFAULT_ANN_BITS,
            ann_seed: defaults::DEFAULT_ANN_SEED,
            rebuild_threshold: defaults::DEFAULT_REBUILD_THRESHOLD,
            min_candidates_factor: defaults::DEFAULT_MIN_ANN_CANDIDATES_FACTOR,
        }
    }
}
