//! StorageEngine: owns the connection pool and implements the ledger and
//! weight-history traits.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::Connection;

use talent_core::config::StorageConfig;
use talent_core::errors::TalentResult;
use talent_core::models::TypeBreakdown;
use talent_core::traits::{IInteractionLedger, IWeightRepository};
use talent_core::{InteractionType, LearningWeights, RecruiterInteraction};
use tracing::debug;

use crate::migrations;
use crate::pool::ConnectionPool;
use crate::queries::{aggregation, interaction_ops, weights_ops};

pub struct StorageEngine {
    pool: ConnectionPool,
}

impl StorageEngine {
    /// Open a storage engine backed by a file on disk.
    pub fn open(path: &Path, config: &StorageConfig) -> TalentResult<Self> {
        let pool = ConnectionPool::open(path, config)?;
        let engine = Self { pool };
        engine.initialize()?;
        Ok(engine)
    }

    /// Open an in-memory storage engine. All reads go through the writer.
    pub fn open_in_memory() -> TalentResult<Self> {
        let engine = Self {
            pool: ConnectionPool::open_in_memory()?,
        };
        engine.initialize()?;
        Ok(engine)
    }

    fn initialize(&self) -> TalentResult<()> {
        self.pool.writer.with_conn(migrations::run_migrations)
    }

    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    pub fn schema_version(&self) -> TalentResult<u32> {
        self.with_reader(migrations::current_version)
    }

    /// File-backed: uses the read pool. In-memory: uses the writer.
    fn with_reader<F, T>(&self, f: F) -> TalentResult<T>
    where
        F: FnOnce(&Connection) -> TalentResult<T>,
    {
        match &self.pool.readers {
            Some(readers) => readers.with_conn(f),
            None => self.pool.writer.with_conn(f),
        }
    }
}

impl IInteractionLedger for StorageEngine {
    fn append(&self, interaction: &RecruiterInteraction) -> TalentResult<()> {
        let inserted = self
            .pool
            .writer
            .with_conn(|conn| interaction_ops::append(conn, interaction))?;
        if !inserted {
            debug!(interaction_id = %interaction.id, "duplicate ledger append ignored");
        }
        Ok(())
    }

    fn count(&self) -> TalentResult<usize> {
        self.with_reader(aggregation::count)
    }

    fn count_since(&self, since: DateTime<Utc>) -> TalentResult<usize> {
        self.with_reader(|conn| aggregation::count_since(conn, since))
    }

    fn count_attributed(&self) -> TalentResult<usize> {
        self.with_reader(aggregation::count_attributed)
    }

    fn training_window(
        &self,
        since: DateTime<Utc>,
        limit: usize,
    ) -> TalentResult<Vec<RecruiterInteraction>> {
        self.with_reader(|conn| interaction_ops::training_window(conn, since, limit))
    }

    fn breakdown_by_type(&self) -> TalentResult<BTreeMap<InteractionType, TypeBreakdown>> {
        self.with_reader(aggregation::breakdown_by_type)
    }
}

impl IWeightRepository for StorageEngine {
    fn load_active(&self) -> TalentResult<Option<LearningWeights>> {
        self.with_reader(weights_ops::load_active)
    }

    fn publish(&self, weights: &LearningWeights) -> TalentResult<LearningWeights> {
        self.pool
            .writer
            .with_conn(|conn| weights_ops::publish(conn, weights))
    }

    fn history(&self, limit: usize) -> TalentResult<Vec<LearningWeights>> {
        self.with_reader(|conn| weights_ops::history(conn, limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_reach_latest_version() {
        let engine = StorageEngine::open_in_memory().unwrap();
        assert_eq!(engine.schema_version().unwrap(), migrations::LATEST_VERSION);
    }

    #[test]
    fn migrations_are_idempotent() {
        let engine = StorageEngine::open_in_memory().unwrap();
        engine.initialize().unwrap();
        assert_eq!(engine.schema_version().unwrap(), migrations::LATEST_VERSION);
    }

    #[test]
    fn empty_store_has_no_active_weights() {
        let engine = StorageEngine::open_in_memory().unwrap();
        assert!(engine.load_active().unwrap().is_none());
        assert_eq!(engine.count().unwrap(), 0);
    }
}
