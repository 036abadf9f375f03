//! SQLite snapshot of the index: one row per entity, vectors stored as
//! little-endian f32 blobs.

use std::path::Path;

use rusqlite::{params, Connection};
use talent_core::errors::EmbeddingError;
use tracing::debug;

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS embeddings (
    entity_id  TEXT PRIMARY KEY,
    dimensions INTEGER NOT NULL,
    vector     BLOB NOT NULL
)";

pub fn encode(v: &[f32]) -> Vec<u8> {
    v.iter().flat_map(|f| f.to_le_bytes()).collect()
}

pub fn decode(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(4)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect()
}

fn open(path: &Path) -> Result<Connection, EmbeddingError> {
    let conn = Connection::open(path).map_err(|e| failed(path, e))?;
    conn.execute_batch(CREATE_TABLE).map_err(|e| failed(path, e))?;
    Ok(conn)
}

/// Every stored row whose blob length agrees with its recorded dimensions.
pub fn read_all(path: &Path) -> Result<Vec<(String, Vec<f32>)>, EmbeddingError> {
    let conn = open(path)?;
    let mut stmt = conn
        .prepare("SELECT entity_id, dimensions, vector FROM embeddings ORDER BY entity_id")
        .map_err(|e| failed(path, e))?;
    let rows = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, Vec<u8>>(2)?,
            ))
        })
        .map_err(|e| failed(path, e))?;

    let mut out = Vec::new();
    for row in rows {
        let (id, dims, blob) = row.map_err(|e| failed(path, e))?;
        let vector = decode(&blob);
        if vector.len() as i64 != dims {
            debug!(entity_id = %id, dims, actual = vector.len(), "skipping truncated embedding row");
            continue;
        }
        out.push((id, vector));
    }
    Ok(out)
}

/// Apply upserts and removals in one transaction. With `replace_all` the
/// table is cleared first so the file mirrors exactly `upserts`.
pub fn write_changes(
    path: &Path,
    upserts: &[(&str, &[f32])],
    removals: &[&str],
    replace_all: bool,
) -> Result<(), EmbeddingError> {
    let mut conn = open(path)?;
    let tx = conn.transaction().map_err(|e| failed(path, e))?;
    if replace_all {
        tx.execute("DELETE FROM embeddings", [])
            .map_err(|e| failed(path, e))?;
    }
    {
        let mut upsert = tx
            .prepare(
                "INSERT INTO embeddings (entity_id, dimensions, vector) VALUES (?1, ?2, ?3)
                 ON CONFLICT(entity_id) DO UPDATE SET dimensions = excluded.dimensions,
                                                      vector = excluded.vector",
            )
            .map_err(|e| failed(path, e))?;
        for (id, v) in upserts {
            upsert
                .execute(params![id, v.len() as i64, encode(v)])
                .map_err(|e| failed(path, e))?;
        }
        let mut delete = tx
            .prepare("DELETE FROM embeddings WHERE entity_id = ?1")
            .map_err(|e| failed(path, e))?;
        for id in removals {
            delete.execute(params![id]).map_err(|e| failed(path, e))?;
        }
    }
    tx.commit().map_err(|e| failed(path, e))?;
    debug!(
        path = %path.display(),
        upserts = upserts.len(),
        removals = removals.len(),
        replace_all,
        "embedding index persisted"
    );
    Ok(())
}

fn failed(path: &Path, e: rusqlite::Error) -> EmbeddingError {
    EmbeddingError::PersistenceFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    }
}
