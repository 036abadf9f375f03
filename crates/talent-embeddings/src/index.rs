//! The embedding index.
//!
//! Vectors are stored L2-normalized. Upserts land in a pending set that is
//! always scanned exactly; once the pending set outgrows
//! `rebuild_threshold` the LSH tables are rebuilt over every vector.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use rayon::prelude::*;
use talent_core::config::EmbeddingConfig;
use talent_core::errors::{EmbeddingError, TalentResult};
use tracing::{debug, info, warn};

use crate::lsh::LshTables;
use crate::persistence;
use crate::vector::{normalize, unit_dot};

#[derive(Default)]
struct IndexState {
    dims: Option<usize>,
    vectors: HashMap<String, Vec<f32>>,
    tables: Option<LshTables>,
    /// Upserted since the last rebuild; not (correctly) reflected in `tables`.
    pending: HashSet<String>,
    /// Changed since the last save to `backing_path`.
    dirty: HashSet<String>,
    removed: HashSet<String>,
    backing_path: Option<PathBuf>,
}

/// Point-in-time counters for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexStats {
    pub entries: usize,
    pub pending: usize,
    pub dirty: usize,
    pub dims: Option<usize>,
    pub tables_built: bool,
}

pub struct EmbeddingIndex {
    config: EmbeddingConfig,
    state: RwLock<IndexState>,
}

impl EmbeddingIndex {
    pub fn new(config: EmbeddingConfig) -> Self {
        Self {
            config,
            state: RwLock::new(IndexState::default()),
        }
    }

    /// Load a saved index. A missing file yields an empty index that will
    /// save to `path`.
    pub fn load(path: &Path, config: EmbeddingConfig) -> TalentResult<Self> {
        let index = Self::new(config);
        {
            let mut state = index.write()?;
            state.backing_path = Some(path.to_path_buf());
            if path.exists() {
                for (id, vector) in persistence::read_all(path)? {
                    let Some(unit) = normalize(&vector) else {
                        continue;
                    };
                    match state.dims {
                        Some(d) if d != unit.len() => {
                            warn!(entity_id = %id, expected = d, actual = unit.len(), "dropping embedding with foreign dimensionality");
                            continue;
                        }
                        None => state.dims = Some(unit.len()),
                        _ => {}
                    }
                    state.vectors.insert(id, unit);
                }
                index.rebuild(&mut state);
            }
            info!(path = %path.display(), entries = state.vectors.len(), "embedding index loaded");
        }
        Ok(index)
    }

    /// Write the index to `path`. Saving back to the file it was loaded from
    /// (or last saved to) writes only the rows that changed.
    pub fn save(&self, path: &Path) -> TalentResult<()> {
        let mut state = self.write()?;
        let incremental = state.backing_path.as_deref() == Some(path);
        {
            let upserts: Vec<(&str, &[f32])> = if incremental {
                state
                    .dirty
                    .iter()
                    .filter_map(|id| state.vectors.get_key_value(id))
                    .map(|(id, v)| (id.as_str(), v.as_slice()))
                    .collect()
            } else {
                state
                    .vectors
                    .iter()
                    .map(|(id, v)| (id.as_str(), v.as_slice()))
                    .collect()
            };
            let removals: Vec<&str> = if incremental {
                state.removed.iter().map(String::as_str).collect()
            } else {
                Vec::new()
            };
            persistence::write_changes(path, &upserts, &removals, !incremental)?;
        }
        state.dirty.clear();
        state.removed.clear();
        state.backing_path = Some(path.to_path_buf());
        Ok(())
    }

    /// Insert or replace the vector for `entity_id`.
    ///
    /// A zero vector is treated as "no embedding" and removes the entity.
    pub fn upsert(&self, entity_id: &str, vector: &[f32]) -> TalentResult<()> {
        if vector.iter().any(|v| !v.is_finite()) {
            return Err(EmbeddingError::InvalidVector {
                entity_id: entity_id.to_string(),
                reason: "non-finite component".to_string(),
            }
            .into());
        }
        let Some(unit) = normalize(vector) else {
            debug!(entity_id, "zero embedding upserted, removing entity");
            self.remove(entity_id)?;
            return Ok(());
        };

        let mut state = self.write()?;
        match state.dims {
            Some(d) if d != unit.len() => {
                return Err(EmbeddingError::DimensionMismatch {
                    expected: d,
                    actual: unit.len(),
                }
                .into());
            }
            None => state.dims = Some(unit.len()),
            _ => {}
        }
        state.vectors.insert(entity_id.to_string(), unit);
        state.pending.insert(entity_id.to_string());
        state.dirty.insert(entity_id.to_string());
        state.removed.remove(entity_id);

        if state.pending.len() > self.config.rebuild_threshold {
            self.rebuild(&mut state);
        }
        Ok(())
    }

    /// Remove an entity. Returns whether it was present.
    pub fn remove(&self, entity_id: &str) -> TalentResult<bool> {
        let mut state = self.write()?;
        let existed = state.vectors.remove(entity_id).is_some();
        if existed {
            state.pending.remove(entity_id);
            state.dirty.remove(entity_id);
            state.removed.insert(entity_id.to_string());
            if state.vectors.is_empty() {
                state.dims = None;
                state.tables = None;
            }
        }
        Ok(existed)
    }

    /// Stored (normalized) vector for `entity_id`.
    pub fn get(&self, entity_id: &str) -> TalentResult<Option<Vec<f32>>> {
        Ok(self.read()?.vectors.get(entity_id).cloned())
    }

    pub fn contains(&self, entity_id: &str) -> TalentResult<bool> {
        Ok(self.read()?.vectors.contains_key(entity_id))
    }

    /// Membership for each of `entity_ids`, in order, under one read lock.
    pub fn contains_all(&self, entity_ids: &[&str]) -> TalentResult<Vec<bool>> {
        let state = self.read()?;
        Ok(entity_ids
            .iter()
            .map(|id| state.vectors.contains_key(*id))
            .collect())
    }

    pub fn len(&self) -> TalentResult<usize> {
        Ok(self.read()?.vectors.len())
    }

    pub fn is_empty(&self) -> TalentResult<bool> {
        Ok(self.len()? == 0)
    }

    pub fn stats(&self) -> TalentResult<IndexStats> {
        let state = self.read()?;
        Ok(IndexStats {
            entries: state.vectors.len(),
            pending: state.pending.len(),
            dirty: state.dirty.len(),
            dims: state.dims,
            tables_built: state.tables.is_some(),
        })
    }

    /// Cosine similarity between two raw vectors. Never fails.
    pub fn similarity(&self, a: &[f32], b: &[f32]) -> f64 {
        crate::vector::similarity(a, b)
    }

    /// The `k` entities most similar to `query`, best first, ties by id.
    ///
    /// Probes the LSH buckets plus every pending upsert; falls back to an
    /// exact scan when probing turns up fewer than
    /// `k * min_candidates_factor` ids. A zero query returns nothing.
    pub fn nearest(&self, query: &[f32], k: usize) -> TalentResult<Vec<(String, f64)>> {
        if k == 0 {
            return Ok(Vec::new());
        }
        let Some(q) = normalize(query) else {
            return Ok(Vec::new());
        };
        let state = self.read()?;
        match state.dims {
            None => return Ok(Vec::new()),
            Some(d) if d != q.len() => {
                return Err(EmbeddingError::DimensionMismatch {
                    expected: d,
                    actual: q.len(),
                }
                .into());
            }
            _ => {}
        }

        let mut probed: HashSet<&str> = state.pending.iter().map(String::as_str).collect();
        if let Some(tables) = &state.tables {
            for id in tables.candidates(&q) {
                if !state.pending.contains(id) && state.vectors.contains_key(id) {
                    probed.insert(id.as_str());
                }
            }
        }

        let floor = k.saturating_mul(self.config.min_candidates_factor.max(1));
        let scored: Vec<(String, f64)> = if probed.len() < floor || state.tables.is_none() {
            debug!(probed = probed.len(), floor, "nearest: exact scan");
            state
                .vectors
                .par_iter()
                .map(|(id, v)| (id.clone(), unit_dot(&q, v)))
                .collect()
        } else {
            probed
                .into_iter()
                .filter_map(|id| state.vectors.get_key_value(id))
                .map(|(id, v)| (id.clone(), unit_dot(&q, v)))
                .collect()
        };
        Ok(top_k(scored, k))
    }

    fn rebuild(&self, state: &mut IndexState) {
        let Some(dims) = state.dims else {
            state.tables = None;
            state.pending.clear();
            return;
        };
        let mut tables = LshTables::new(
            dims,
            self.config.ann_tables,
            self.config.ann_bits,
            self.config.ann_seed,
        );
        for (id, v) in &state.vectors {
            tables.insert(id, v);
        }
        debug!(entries = state.vectors.len(), folded = state.pending.len(), "LSH tables rebuilt");
        state.tables = Some(tables);
        state.pending.clear();
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, IndexState>, EmbeddingError> {
        self.state.read().map_err(|_| EmbeddingError::LockPoisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, IndexState>, EmbeddingError> {
        self.state.write().map_err(|_| EmbeddingError::LockPoisoned)
    }
}

fn top_k(mut scored: Vec<(String, f64)>, k: usize) -> Vec<(String, f64)> {
    let order = |a: &(String, f64), b: &(String, f64)| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0));
    if scored.len() > k {
        scored.select_nth_unstable_by(k - 1, order);
        scored.truncate(k);
    }
    scored.sort_by(order);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> EmbeddingConfig {
        EmbeddingConfig {
            rebuild_threshold: 2,
            ..EmbeddingConfig::default()
        }
    }

    #[test]
    fn upsert_normalizes() {
        let index = EmbeddingIndex::new(small_config());
        index.upsert("a", &[3.0, 4.0]).unwrap();
        let v = index.get("a").unwrap().unwrap();
        assert!((v[0] - 0.6).abs() < 1e-6 && (v[1] - 0.8).abs() < 1e-6);
    }

    #[test]
    fn dimension_mismatch_is_rejected() {
        let index = EmbeddingIndex::new(small_config());
        index.upsert("a", &[1.0, 0.0]).unwrap();
        assert!(index.upsert("b", &[1.0, 0.0, 0.0]).is_err());
    }

    #[test]
    fn zero_vector_removes_entity() {
        let index = EmbeddingIndex::new(small_config());
        index.upsert("a", &[1.0, 0.0]).unwrap();
        index.upsert("a", &[0.0, 0.0]).unwrap();
        assert!(!index.contains("a").unwrap());
    }

    #[test]
    fn contains_all_preserves_order() {
        let index = EmbeddingIndex::new(small_config());
        index.upsert("a", &[1.0, 0.0]).unwrap();
        index.upsert("c", &[0.0, 1.0]).unwrap();
        assert_eq!(
            index.contains_all(&["c", "b", "a"]).unwrap(),
            vec![true, false, true]
        );
        assert!(index.contains_all(&[]).unwrap().is_empty());
    }

    #[test]
    fn compaction_folds_pending_into_tables() {
        let index = EmbeddingIndex::new(small_config());
        for i in 0..3 {
            index.upsert(&format!("e{i}"), &[1.0, i as f32]).unwrap();
        }
        let stats = index.stats().unwrap();
        assert!(stats.tables_built);
        assert_eq!(stats.pending, 0);
        assert_eq!(stats.entries, 3);
    }

    #[test]
    fn nearest_orders_by_similarity() {
        let index = EmbeddingIndex::new(small_config());
        index.upsert("x", &[1.0, 0.0]).unwrap();
        index.upsert("y", &[0.0, 1.0]).unwrap();
        index.upsert("xy", &[1.0, 1.0]).unwrap();
        let hits = index.nearest(&[1.0, 0.1], 2).unwrap();
        assert_eq!(hits[0].0, "x");
        assert_eq!(hits[1].0, "xy");
    }

    #[test]
    fn nearest_with_zero_query_is_empty() {
        let index = EmbeddingIndex::new(small_config());
        index.upsert("x", &[1.0, 0.0]).unwrap();
        assert!(index.nearest(&[0.0, 0.0], 3).unwrap().is_empty());
    }

    #[test]
    fn top_k_breaks_ties_by_id() {
        let scored = vec![("b".to_string(), 0.5), ("a".to_string(), 0.5), ("c".to_string(), 0.9)];
        let top = top_k(scored, 2);
        assert_eq!(top[0].0, "c");
        assert_eq!(top[1].0, "a");
    }
}
