/// Weight optimizer errors.
#[derive(Debug, thiserror::Error)]
pub enum LearningError {
    #[error("optimizer failure: {reason}")]
    OptimizerFailure { reason: String },

    #[error("invalid weights: {reason}")]
    InvalidWeights { reason: String },
}
