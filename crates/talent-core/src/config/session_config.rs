use serde::{Deserialize, Serialize};

use super::defaults;

/// Search session cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Lifetime of a cached ranking context, in seconds.
    pub ttl_secs: u64,
    /// Maximum number of (session, job, candidate) entries held.
    pub max_entries: u64,
    /// Interval between background sweeps of expired entries.
    pub sweep_interval_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_secs: defaults::DEFAULT_SESSION_TTL_SECS,
            max_entries: defaults::DEFAULT_SESSION_MAX_ENTRIES,
            sweep_interval_secs: defaults::DEFAULT_SWEEP_INTERVAL_SECS,
        }
    }
}
