use serde::{Deserialize, Serialize};

use super::defaults;

/// Weight optimizer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LearningConfig {
    /// Usable interactions required before a retrain publishes weights.
    pub min_interactions: usize,
    /// Only interactions newer than this many days are used for training.
    pub training_window_days: i64,
    /// Cap on the number of interactions loaded for one retrain.
    pub max_training_records: usize,
    /// Ridge regularisation strength.
    pub ridge_alpha: f64,
    /// Feedback-driven retrain cadence once the data gate is open.
    pub retrain_every_interactions: usize,
    /// Interval between scheduled retrain checks, in seconds.
    pub retrain_interval_secs: u64,
    /// New interactions required before a scheduled retrain runs.
    pub min_new_interactions: usize,
    /// Reward policy.
    pub reward: RewardConfig,
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            min_interactions: defaults::DEFAULT_MIN_INTERACTIONS,
            training_window_days: defaults::DEFAULT_TRAINING_WINDOW_DAYS,
            max_training_records: defaults::DEFAULT_MAX_TRAINING_RECORDS,
            ridge_alpha: defaults::DEFAULT_RIDGE_ALPHA,
            retrain_every_interactions: defaults::DEFAULT_RETRAIN_EVERY_INTERACTIONS,
            retrain_interval_secs: defaults::DEFAULT_RETRAIN_INTERVAL_SECS,
            min_new_interactions: defaults::DEFAULT_MIN_NEW_INTERACTIONS,
            reward: RewardConfig::default(),
        }
    }
}

/// Reward values per interaction type plus rank adjustments.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardConfig {
    pub view: f64,
    pub shortlist: f64,
    pub application: f64,
    pub interview: f64,
    pub hire: f64,
    pub reject: f64,
    /// Bonus granted at rank 1, decaying linearly to 0 at `bonus_horizon`.
    pub position_bonus_max: f64,
    pub bonus_horizon: u32,
    /// Base rewards at or above this are "high reward" interactions.
    pub high_reward_threshold: f64,
    /// Ranks strictly worse than this are "poor".
    pub poor_rank_threshold: u32,
    /// Subtracted from high-reward interactions at poor ranks.
    pub poor_rank_penalty: f64,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            view: defaults::DEFAULT_REWARD_VIEW,
            shortlist: defaults::DEFAULT_REWARD_SHORTLIST,
            application: defaults::DEFAULT_REWARD_APPLICATION,
            interview: defaults::DEFAULT_REWARD_INTERVIEW,
            hire: defaults::DEFAULT_REWARD_HIRE,
            reject: defaults::DEFAULT_REWARD_REJECT,
            position_bonus_max: defaults::DEFAULT_POSITION_BONUS_MAX,
            bonus_horizon: defaults::DEFAULT_BONUS_HORIZON,
            high_reward_threshold: defaults::DEFAULT_HIGH_REWARD_THRESHOLD,
            poor_rank_threshold: defaults::DEFAULT_POOR_RANK_THRESHOLD,
            poor_rank_penalty: defaults::DEFAULT_POOR_RANK_PENALTY,
        }
    }
}
