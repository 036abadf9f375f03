//! Single write connection. Writes are serialized behind a mutex.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;

use talent_core::config::defaults::DEFAULT_BUSY_TIMEOUT_MS;
use talent_core::errors::{StorageError, TalentResult};

use super::pragmas::apply_pragmas;
use crate::to_storage_err;

pub struct WriteConnection {
    conn: Mutex<Connection>,
}

impl WriteConnection {
    pub fn open(path: &Path, busy_timeout_ms: u32) -> TalentResult<Self> {
        let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        apply_pragmas(&conn, busy_timeout_ms)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_in_memory() -> TalentResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        apply_pragmas(&conn, DEFAULT_BUSY_TIMEOUT_MS)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Acquire the write lock and execute a closure with the connection.
    /// Safe to call from inside a tokio runtime.
    pub fn with_conn<F, T>(&self, f: F) -> TalentResult<T>
    where
        F: FnOnce(&Connection) -> TalentResult<T>,
    {
        let guard = self
            .conn
            .lock()
            .map_err(|_| StorageError::ConnectionPoisoned)?;
        f(&guard)
    }
}
