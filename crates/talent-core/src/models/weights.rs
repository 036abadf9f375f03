use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::defaults;
use crate::constants::WEIGHT_SUM_TOLERANCE;
use crate::errors::LearningError;

use super::score::ComponentScores;

/// The three per-component weights. Non-negative, summing to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub semantic: f64,
    pub skill: f64,
    pub experience: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            semantic: defaults::DEFAULT_SEMANTIC_WEIGHT,
            skill: defaults::DEFAULT_SKILL_WEIGHT,
            experience: defaults::DEFAULT_EXPERIENCE_WEIGHT,
        }
    }
}

impl ScoreWeights {
    /// Build a weight triple, rejecting anything off the simplex.
    pub fn new(semantic: f64, skill: f64, experience: f64) -> Result<Self, LearningError> {
        let weights = Self {
            semantic,
            skill,
            experience,
        };
        weights.validate()?;
        Ok(weights)
    }

    /// Rectify raw coefficients to non-negative and scale them to sum to 1.
    pub fn from_raw(raw: [f64; 3]) -> Result<Self, LearningError> {
        if raw.iter().any(|c| !c.is_finite()) {
            return Err(LearningError::OptimizerFailure {
                reason: format!("non-finite coefficients {raw:?}"),
            });
        }
        let rectified = raw.map(|c| c.max(0.0));
        let sum: f64 = rectified.iter().sum();
        if sum <= f64::EPSILON {
            return Err(LearningError::OptimizerFailure {
                reason: "all coefficients are non-positive".to_string(),
            });
        }
        Ok(Self {
            semantic: rectified[0] / sum,
            skill: rectified[1] / sum,
            experience: rectified[2] / sum,
        })
    }

    pub fn validate(&self) -> Result<(), LearningError> {
        let parts = self.as_array();
        if parts.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(LearningError::InvalidWeights {
                reason: format!("weights must be finite and non-negative: {parts:?}"),
            });
        }
        let sum: f64 = parts.iter().sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(LearningError::InvalidWeights {
                reason: format!("weights sum to {sum}, expected 1.0"),
            });
        }
        Ok(())
    }

    pub fn as_array(&self) -> [f64; 3] {
        [self.semantic, self.skill, self.experience]
    }

    /// Weighted total of the component scores.
    pub fn dot(&self, scores: &ComponentScores) -> f64 {
        self.semantic * scores.semantic
            + self.skill * scores.skill_overlap
            + self.experience * scores.experience
    }
}

/// Where a weight record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightSource {
    Default,
    Learned,
}

impl WeightSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Learned => "learned",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "default" => Some(Self::Default),
            "learned" => Some(Self::Learned),
            _ => None,
        }
    }
}

/// A published weight set with its training metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningWeights {
    /// Monotonic version assigned at publish time. 0 for the built-in defaults.
    pub version: u64,
    pub semantic_weight: f64,
    pub skill_weight: f64,
    pub experience_weight: f64,
    pub trained_at: Option<DateTime<Utc>>,
    pub sample_count: usize,
    /// R² of the fit, in [0, 1].
    pub confidence: f64,
    pub source: WeightSource,
    /// blake3 over the ordered training sample ids.
    pub fingerprint: Option<String>,
}

impl Default for LearningWeights {
    fn default() -> Self {
        Self::from_weights(ScoreWeights::default())
    }
}

impl LearningWeights {
    /// Unversioned, untrained record carrying the given triple.
    pub fn from_weights(weights: ScoreWeights) -> Self {
        Self {
            version: 0,
            semantic_weight: weights.semantic,
            skill_weight: weights.skill,
            experience_weight: weights.experience,
            trained_at: None,
            sample_count: 0,
            confidence: 0.0,
            source: WeightSource::Default,
            fingerprint: None,
        }
    }

    pub fn weights(&self) -> ScoreWeights {
        ScoreWeights {
            semantic: self.semantic_weight,
            skill: self.skill_weight,
            experience: self.experience_weight,
        }
    }

    pub fn is_learned(&self) -> bool {
        self.source == WeightSource::Learned
    }

    /// Learned, trained within `max_age_days`, and confident enough to trust.
    pub fn is_fresh(&self, now: DateTime<Utc>, max_age_days: i64, min_confidence: f64) -> bool {
        match self.trained_at {
            Some(at) if self.is_learned() => {
                now - at < chrono::Duration::days(max_age_days) && self.confidence > min_confidence
            }
            _ => false,
        }
    }
}
