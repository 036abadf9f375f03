//! Top-level configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{
    EmbeddingConfig, LearningConfig, ObservabilityConfig, ScoringConfig, SessionConfig,
    StorageConfig,
};
use crate::constants::WEIGHT_SUM_TOLERANCE;
use crate::errors::ConfigError;

/// Name of the project-level config file.
pub const CONFIG_FILENAME: &str = "talent.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`TALENT_*`)
/// 2. Config file (`talent.toml`)
/// 3. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TalentConfig {
    pub scoring: ScoringConfig,
    pub embeddings: EmbeddingConfig,
    pub session: SessionConfig,
    pub learning: LearningConfig,
    pub storage: StorageConfig,
    pub observability: ObservabilityConfig,
}

impl TalentConfig {
    /// Load configuration from `root/talent.toml` (if present) and the process
    /// environment, then validate.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let path = root.join(CONFIG_FILENAME);
        let mut config = if path.exists() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a config file without applying env overrides or validation.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `TALENT_*` overrides. `lookup` abstracts the environment so
    /// tests don't have to mutate process state.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("TALENT_DB_PATH") {
            self.storage.db_path = v;
        }
        if let Some(v) = lookup("TALENT_INDEX_PATH") {
            self.embeddings.index_path = v;
        }
        if let Some(v) = lookup("TALENT_LOG_LEVEL") {
            self.observability.log_level = v;
        }
        if let Some(v) = lookup("TALENT_SESSION_TTL_SECS") {
            self.session.ttl_secs = parse_env("TALENT_SESSION_TTL_SECS", &v)?;
        }
        if let Some(v) = lookup("TALENT_MIN_INTERACTIONS") {
            self.learning.min_interactions = parse_env("TALENT_MIN_INTERACTIONS", &v)?;
        }
        if let Some(v) = lookup("TALENT_RIDGE_ALPHA") {
            self.learning.ridge_alpha = parse_env("TALENT_RIDGE_ALPHA", &v)?;
        }
        if let Some(v) = lookup("TALENT_RETRAIN_INTERVAL_SECS") {
            self.learning.retrain_interval_secs = parse_env("TALENT_RETRAIN_INTERVAL_SECS", &v)?;
        }
        Ok(())
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let s = &self.scoring;
        let weights = [
            s.default_semantic_weight,
            s.default_skill_weight,
            s.default_experience_weight,
        ];
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(invalid("scoring.default_*_weight", "must be finite and non-negative"));
        }
        if (weights.iter().sum::<f64>() - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(invalid("scoring.default_*_weight", "must sum to 1.0"));
        }
        if s.default_top_k == 0 || s.default_top_k > s.max_top_k {
            return Err(invalid("scoring.default_top_k", "must be in 1..=max_top_k"));
        }
        if s.ann_prefilter_limit == 0 {
            return Err(invalid("scoring.ann_prefilter_limit", "must be greater than 0"));
        }

        let e = &self.embeddings;
        if e.ann_tables == 0 {
            return Err(invalid("embeddings.ann_tables", "must be greater than 0"));
        }
        if e.ann_bits == 0 || e.ann_bits > 64 {
            return Err(invalid("embeddings.ann_bits", "must be between 1 and 64"));
        }

        if self.session.ttl_secs == 0 {
            return Err(invalid("session.ttl_secs", "must be greater than 0"));
        }

        let l = &self.learning;
        if l.min_interactions == 0 {
            return Err(invalid("learning.min_interactions", "must be greater than 0"));
        }
        if !(l.ridge_alpha.is_finite() && l.ridge_alpha > 0.0) {
            return Err(invalid("learning.ridge_alpha", "must be a positive number"));
        }
        if l.training_window_days <= 0 {
            return Err(invalid("learning.training_window_days", "must be greater than 0"));
        }
        if l.max_training_records == 0 {
            return Err(invalid("learning.max_training_records", "must be greater than 0"));
        }
        let r = &l.reward;
        let hire_is_max = [r.view, r.shortlist, r.application, r.interview, r.reject]
            .iter()
            .all(|v| *v <= r.hire);
        if !hire_is_max {
            return Err(invalid("learning.reward.hire", "must be the largest reward"));
        }
        if r.bonus_horizon == 0 {
            return Err(invalid("learning.reward.bonus_horizon", "must be greater than 0"));
        }

        if self.storage.max_write_attempts == 0 {
            return Err(invalid("storage.max_write_attempts", "must be greater than 0"));
        }
        Ok(())
    }
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::ValidationFailed {
        field: field.to_string(),
        message: message.to_string(),
    }
}

fn parse_env<T: std::str::FromStr>(var: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidEnvValue {
        var: var.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        TalentConfig::default().validate().unwrap();
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = TalentConfig::from_toml(
            r#"
            [session]
            ttl_secs = 600
            "#,
        )
        .unwrap();
        assert_eq!(config.session.ttl_secs, 600);
        assert_eq!(config.learning.min_interactions, 50);
    }

    #[test]
    fn rejects_weights_not_summing_to_one() {
        let err = TalentConfig::from_toml(
            r#"
            [scoring]
            default_semantic_weight = 0.5
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::ValidationFailed { .. }));
    }

    #[test]
    fn env_overrides_apply() {
        let mut config = TalentConfig::default();
        config
            .apply_env_overrides(|key| match key {
                "TALENT_MIN_INTERACTIONS" => Some("75".to_string()),
                "TALENT_DB_PATH" => Some("/tmp/x.db".to_string()),
                _ => None,
            })
            .unwrap();
        assert_eq!(config.learning.min_interactions, 75);
        assert_eq!(config.storage.db_path, "/tmp/x.db");
    }

    #[test]
    fn bad_env_value_is_reported() {
        let mut config = TalentConfig::default();
        let err = config
            .apply_env_overrides(|key| (key == "TALENT_RIDGE_ALPHA").then(|| "abc".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvValue { .. }));
    }

    #[test]
    fn hire_must_be_largest_reward() {
        let err = TalentConfig::from_toml(
            r#"
            [learning.reward]
            interview = 1.5
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::ValidationFailed { .. }));
    }
}
