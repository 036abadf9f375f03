use crate::errors::TalentResult;
use crate::models::LearningWeights;

/// Versioned weight history with a single active record.
pub trait IWeightRepository: Send + Sync {
    fn load_active(&self) -> TalentResult<Option<LearningWeights>>;

    /// Persist `weights` as the new active record, deactivating the previous
    /// one in the same transaction. Returns the record with its assigned version.
    fn publish(&self, weights: &LearningWeights) -> TalentResult<LearningWeights>;

    /// Newest first.
    fn history(&self, limit: usize) -> TalentResult<Vec<LearningWeights>>;
}
