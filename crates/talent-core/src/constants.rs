/// Engine version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Tolerance used when checking that a weight triple sums to 1.0.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Window used for the "recent interactions" metric.
pub const RECENT_INTERACTIONS_DAYS: i64 = 7;

/// Learned weights younger than this are considered fresh.
pub const WEIGHTS_FRESHNESS_DAYS: i64 = 7;

/// Learned weights need at least this confidence to be considered fresh.
pub const WEIGHTS_FRESHNESS_MIN_CONFIDENCE: f64 = 0.3;

/// Maximum number of jobs accepted by a single bulk search.
pub const MAX_BULK_JOBS: usize = 100;
