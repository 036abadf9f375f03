/// Storage-layer errors for SQLite operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("migration failed at version {version}: {reason}")]
    MigrationFailed { version: u32, reason: String },

    #[error("ledger is append-only: {operation} rejected")]
    AppendOnlyViolation { operation: String },

    #[error("write connection poisoned")]
    ConnectionPoisoned,

    #[error("write gave up after {attempts} attempts: {reason}")]
    RetriesExhausted { attempts: u32, reason: String },
}
