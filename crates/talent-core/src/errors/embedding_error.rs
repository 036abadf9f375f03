/// Embedding index errors.
#[derive(Debug, thiserror::Error)]
pub enum EmbeddingError {
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("invalid vector for {entity_id}: {reason}")]
    InvalidVector { entity_id: String, reason: String },

    #[error("index persistence failed: {path}: {reason}")]
    PersistenceFailed { path: String, reason: String },

    #[error("index lock poisoned")]
    LockPoisoned,
}
