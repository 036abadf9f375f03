//! The Weight Store: one current weight set behind an atomically swapped
//! pointer, backed by the versioned weight history.

use std::sync::{Arc, RwLock};

use talent_core::errors::LearningError;
use talent_core::traits::IWeightRepository;
use talent_core::{LearningWeights, ScoreWeights, TalentResult};
use tracing::{info, warn};

pub struct WeightStore {
    current: RwLock<Arc<LearningWeights>>,
    repository: Arc<dyn IWeightRepository>,
    defaults: ScoreWeights,
}

impl WeightStore {
    /// Load the active record, or fall back to `defaults` when none exists.
    pub fn open(
        repository: Arc<dyn IWeightRepository>,
        defaults: ScoreWeights,
    ) -> TalentResult<Self> {
        defaults.validate()?;
        let initial = match repository.load_active()? {
            Some(active) => match active.weights().validate() {
                Ok(()) => {
                    info!(version = active.version, source = active.source.as_str(), "loaded active weights");
                    active
                }
                Err(e) => {
                    warn!(version = active.version, error = %e, "active weights invalid, using defaults");
                    LearningWeights::from_weights(defaults)
                }
            },
            None => LearningWeights::from_weights(defaults),
        };
        Ok(Self {
            current: RwLock::new(Arc::new(initial)),
            repository,
            defaults,
        })
    }

    /// Last fully committed weights. Never blocks on a retrain.
    pub fn current(&self) -> Arc<LearningWeights> {
        match self.current.read() {
            Ok(guard) => Arc::clone(&*guard),
            Err(poisoned) => Arc::clone(&*poisoned.into_inner()),
        }
    }

    pub fn defaults(&self) -> ScoreWeights {
        self.defaults
    }

    /// Validate, persist, then swap the pointer. The swap only happens after
    /// the record is durable.
    pub fn publish(&self, weights: LearningWeights) -> TalentResult<Arc<LearningWeights>> {
        weights.weights().validate()?;
        let stored = Arc::new(self.repository.publish(&weights)?);
        let mut guard = self
            .current
            .write()
            .map_err(|_| LearningError::InvalidWeights {
                reason: "weight store lock poisoned".to_string(),
            })?;
        *guard = Arc::clone(&stored);
        Ok(stored)
    }

    pub fn history(&self, limit: usize) -> TalentResult<Vec<LearningWeights>> {
        self.repository.history(limit)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct MemoryRepo {
        rows: Mutex<Vec<LearningWeights>>,
    }

    impl IWeightRepository for MemoryRepo {
        fn load_active(&self) -> TalentResult<Option<LearningWeights>> {
            Ok(self.rows.lock().unwrap().last().cloned())
        }

        fn publish(&self, weights: &LearningWeights) -> TalentResult<LearningWeights> {
            let mut rows = self.rows.lock().unwrap();
            let mut stored = weights.clone();
            stored.version = rows.len() as u64 + 1;
            rows.push(stored.clone());
            Ok(stored)
        }

        fn history(&self, limit: usize) -> TalentResult<Vec<LearningWeights>> {
            Ok(self.rows.lock().unwrap().iter().rev().take(limit).cloned().collect())
        }
    }

    #[test]
    fn empty_repository_yields_defaults() {
        let store = WeightStore::open(Arc::new(MemoryRepo::default()), ScoreWeights::default()).unwrap();
        let current = store.current();
        assert_eq!(current.weights(), ScoreWeights::default());
        assert_eq!(current.version, 0);
        assert!(!current.is_learned());
    }

    #[test]
    fn publish_swaps_pointer() {
        let store = WeightStore::open(Arc::new(MemoryRepo::default()), ScoreWeights::default()).unwrap();
        let before = store.current();
        let next = LearningWeights::from_weights(ScoreWeights::new(0.5, 0.3, 0.2).unwrap());
        let stored = store.publish(next).unwrap();
        assert_eq!(stored.version, 1);
        assert_eq!(store.current().weights().semantic, 0.5);
        // Readers holding the old Arc keep a complete record.
        assert_eq!(before.weights(), ScoreWeights::default());
    }

    #[test]
    fn publish_rejects_off_simplex_weights() {
        let store = WeightStore::open(Arc::new(MemoryRepo::default()), ScoreWeights::default()).unwrap();
        let mut bad = LearningWeights::default();
        bad.semantic_weight = 0.9;
        assert!(store.publish(bad).is_err());
        assert_eq!(store.current().weights(), ScoreWeights::default());
        assert!(store.history(10).unwrap().is_empty());
    }

    #[test]
    fn reopen_restores_active() {
        let repo = Arc::new(MemoryRepo::default());
        let store = WeightStore::open(repo.clone(), ScoreWeights::default()).unwrap();
        store
            .publish(LearningWeights::from_weights(ScoreWeights::new(0.2, 0.6, 0.2).unwrap()))
            .unwrap();
        let reopened = WeightStore::open(repo, ScoreWeights::default()).unwrap();
        assert_eq!(reopened.current().weights().skill, 0.6);
    }
}
