//! Turns ledger records into a training set.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use talent_core::RecruiterInteraction;

/// Rank buckets used in [`TrainingReport::avg_reward_by_rank`].
const RANK_BUCKETS: [(&str, u32, u32); 4] = [
    ("1", 1, 1),
    ("2-5", 2, 5),
    ("6-10", 6, 10),
    ("11+", 11, u32::MAX),
];

#[derive(Debug, Clone, PartialEq)]
pub struct TrainingSample {
    pub interaction_id: String,
    pub rank: u32,
    pub features: [f64; 3],
    pub reward: f64,
}

/// Usable samples from one training window, in ledger order.
#[derive(Debug, Clone, Default)]
pub struct TrainingSet {
    samples: Vec<TrainingSample>,
    /// Interactions in the window that could not be attributed.
    pub unattributed: usize,
}

impl TrainingSet {
    pub fn from_interactions(interactions: &[RecruiterInteraction]) -> Self {
        let mut set = Self::default();
        for interaction in interactions {
            match (interaction.search_rank_at_time, interaction.original_scores_at_time) {
                (Some(rank), Some(scores)) if interaction.reward.is_finite() => {
                    set.samples.push(TrainingSample {
                        interaction_id: interaction.id.clone(),
                        rank,
                        features: scores.as_array(),
                        reward: interaction.reward,
                    });
                }
                _ => set.unattributed += 1,
            }
        }
        set
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[TrainingSample] {
        &self.samples
    }

    pub fn features(&self) -> Vec<[f64; 3]> {
        self.samples.iter().map(|s| s.features).collect()
    }

    pub fn targets(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.reward).collect()
    }

    /// blake3 over the ordered sample ids. Equal fingerprints mean equal input.
    pub fn fingerprint(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        for sample in &self.samples {
            hasher.update(sample.interaction_id.as_bytes());
            hasher.update(&[0]);
        }
        hasher.finalize().to_hex().to_string()
    }

    pub fn report(&self, r2: Option<f64>) -> TrainingReport {
        let samples = self.samples.len();
        let positive = self.samples.iter().filter(|s| s.reward > 0.0).count();
        let negative = self.samples.iter().filter(|s| s.reward < 0.0).count();
        let avg_reward = if samples == 0 {
            0.0
        } else {
            self.samples.iter().map(|s| s.reward).sum::<f64>() / samples as f64
        };

        let mut avg_reward_by_rank = BTreeMap::new();
        for (label, lo, hi) in RANK_BUCKETS {
            let rewards: Vec<f64> = self
                .samples
                .iter()
                .filter(|s| s.rank >= lo && s.rank <= hi)
                .map(|s| s.reward)
                .collect();
            if !rewards.is_empty() {
                let avg = rewards.iter().sum::<f64>() / rewards.len() as f64;
                avg_reward_by_rank.insert(label.to_string(), avg);
            }
        }

        TrainingReport {
            samples,
            positive,
            negative,
            positive_ratio: if samples == 0 {
                0.0
            } else {
                positive as f64 / samples as f64
            },
            avg_reward,
            avg_reward_by_rank,
            r2,
        }
    }
}

/// Summary of the data a retrain saw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    pub samples: usize,
    pub positive: usize,
    pub negative: usize,
    pub positive_ratio: f64,
    pub avg_reward: f64,
    pub avg_reward_by_rank: BTreeMap<String, f64>,
    /// `None` when no fit was run.
    pub r2: Option<f64>,
}
