//! # talent-learning
//!
//! Learns how to weight the three score components from recruiter
//! feedback. Interactions become rewards, attributed rewards become a ridge
//! regression problem, and the fitted coefficients are rectified onto the
//! simplex and published through the [`WeightStore`].

pub mod dataset;
pub mod optimizer;
pub mod reward;
pub mod ridge;
pub mod store;
pub mod triggers;

pub use dataset::{TrainingReport, TrainingSet};
pub use optimizer::{RetrainOutcome, RetrainResult, SkipReason, WeightOptimizer};
pub use reward::RewardPolicy;
pub use store::WeightStore;
pub use triggers::RetrainTrigger;
