use super::{ConfigError, EmbeddingError, LearningError, StorageError};

/// Result alias used across every talent crate.
pub type TalentResult<T> = Result<T, TalentError>;

/// Top-level error for the matching engine.
#[derive(Debug, thiserror::Error)]
pub enum TalentError {
    #[error("invalid job {job_id}: {reason}")]
    InvalidJob { job_id: String, reason: String },

    #[error("malformed candidate {candidate_id}: {reason}")]
    MalformedCandidate { candidate_id: String, reason: String },

    #[error("invalid request: {reason}")]
    InvalidRequest { reason: String },

    #[error("storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("embedding error: {0}")]
    EmbeddingError(#[from] EmbeddingError),

    #[error("learning error: {0}")]
    LearningError(#[from] LearningError),

    #[error("config error: {0}")]
    ConfigError(#[from] ConfigError),
}

impl TalentError {
    pub fn invalid_job(job_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidJob {
            job_id: job_id.into(),
            reason: reason.into(),
        }
    }

    pub fn malformed_candidate(
        candidate_id: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::MalformedCandidate {
            candidate_id: candidate_id.into(),
            reason: reason.into(),
        }
    }
}
