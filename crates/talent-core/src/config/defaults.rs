// Single source of truth for all default values.

// --- Scoring ---
pub const DEFAULT_SEMANTIC_WEIGHT: f64 = 0.4;
pub const DEFAULT_SKILL_WEIGHT: f64 = 0.4;
pub const DEFAULT_EXPERIENCE_WEIGHT: f64 = 0.2;
pub const DEFAULT_TOP_K: usize = 10;
pub const DEFAULT_MAX_TOP_K: usize = 500;
pub const DEFAULT_ANN_PREFILTER_THRESHOLD: usize = 5_000;
pub const DEFAULT_ANN_PREFILTER_LIMIT: usize = 1_000;
pub const DEFAULT_SCORING_THREADS: usize = 0; // 0 = rayon global pool

// --- Embeddings ---
pub const DEFAULT_INDEX_FILENAME: &str = "embeddings.db";
pub const DEFAULT_ANN_TABLES: usize = 8;
pub const DEFAULT_ANN_BITS: usize = 12;
pub const DEFAULT_ANN_SEED: u64 = 0x7a1e_47a5;
pub const DEFAULT_REBUILD_THRESHOLD: usize = 256;
pub const DEFAULT_MIN_ANN_CANDIDATES_FACTOR: usize = 4;

// --- Session cache ---
pub const DEFAULT_SESSION_TTL_SECS: u64 = 1_800; // 30 minutes
pub const DEFAULT_SESSION_MAX_ENTRIES: u64 = 200_000;
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60;

// --- Learning ---
pub const DEFAULT_MIN_INTERACTIONS: usize = 50;
pub const DEFAULT_TRAINING_WINDOW_DAYS: i64 = 30;
pub const DEFAULT_MAX_TRAINING_RECORDS: usize = 1_000;
pub const DEFAULT_RIDGE_ALPHA: f64 = 0.1;
pub const DEFAULT_RETRAIN_EVERY_INTERACTIONS: usize = 10;
pub const DEFAULT_RETRAIN_INTERVAL_SECS: u64 = 21_600; // 6 hours
pub const DEFAULT_MIN_NEW_INTERACTIONS: usize = 20;

// --- Reward policy ---
pub const DEFAULT_REWARD_VIEW: f64 = 0.1;
pub const DEFAULT_REWARD_SHORTLIST: f64 = 0.3;
pub const DEFAULT_REWARD_APPLICATION: f64 = 0.7;
pub const DEFAULT_REWARD_INTERVIEW: f64 = 0.9;
pub const DEFAULT_REWARD_HIRE: f64 = 1.0;
pub const DEFAULT_REWARD_REJECT: f64 = -0.5;
pub const DEFAULT_POSITION_BONUS_MAX: f64 = 0.2;
pub const DEFAULT_BONUS_HORIZON: u32 = 10;
pub const DEFAULT_HIGH_REWARD_THRESHOLD: f64 = 0.7;
pub const DEFAULT_POOR_RANK_THRESHOLD: u32 = 10;
pub const DEFAULT_POOR_RANK_PENALTY: f64 = 0.1;

// --- Storage ---
pub const DEFAULT_DB_FILENAME: &str = "talent.db";
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5_000;
pub const DEFAULT_READ_POOL_SIZE: usize = 4;
pub const DEFAULT_MAX_WRITE_ATTEMPTS: u32 = 5;
pub const DEFAULT_RETRY_BASE_DELAY_MS: u64 = 200;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;
