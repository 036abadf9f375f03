use serde::{Deserialize, Serialize};

use super::defaults;

/// Storage subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the SQLite database file holding the ledger and weights.
    pub db_path: String,
    /// Busy timeout in milliseconds.
    pub busy_timeout_ms: u32,
    /// Number of read connections in the pool.
    pub read_pool_size: usize,
    /// Attempts (including the first) before a ledger write is dropped.
    pub max_write_attempts: u32,
    /// Base delay of the exponential retry backoff.
    pub retry_base_delay_ms: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: defaults::DEFAULT_DB_FILENAME.to_string(),
            busy_timeout_ms: defaults::DEFAULT_BUSY_TIMEOUT_MS,
            read_pool_size: defaults::DEFAULT_READ_POOL_SIZE,
            max_write_attempts: defaults::DEFAULT_MAX_WRITE_ATTEMPTS,
            retry_base_delay_ms: defaults::DEFAULT_RETRY_BASE_DELAY_MS,
        }
    }
}
