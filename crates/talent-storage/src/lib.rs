//! # talent-storage
//!
//! SQLite persistence for the learning loop: the append-only interaction
//! ledger and the versioned history of published weight sets.

pub mod engine;
pub mod migrations;
pub mod pool;
pub mod queries;

pub use engine::StorageEngine;

use talent_core::errors::{StorageError, TalentError};

/// Convert a SQLite failure message into the storage error variant.
pub fn to_storage_err(message: String) -> TalentError {
    if message.contains("append-only") {
        return StorageError::AppendOnlyViolation { operation: message }.into();
    }
    StorageError::SqliteError { message }.into()
}
