//! Publish, load, and list weight records.

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};

use talent_core::errors::TalentResult;
use talent_core::models::WeightSource;
use talent_core::LearningWeights;

use super::{format_ts, parse_ts};
use crate::to_storage_err;

const COLUMNS: &str = "version, semantic_weight, skill_weight, experience_weight, trained_at,
    sample_count, confidence, source, fingerprint";

/// Deactivate the current row and insert `weights` as the active one, in a
/// single transaction. Returns the record with its assigned version.
pub fn publish(conn: &Connection, weights: &LearningWeights) -> TalentResult<LearningWeights> {
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| to_storage_err(format!("publish begin: {e}")))?;

    tx.execute(
        "UPDATE learning_weights SET is_active = 0 WHERE is_active = 1",
        [],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    tx.execute(
        "INSERT INTO learning_weights (
            semantic_weight, skill_weight, experience_weight, trained_at,
            sample_count, confidence, source, fingerprint, is_active, published_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, 1, ?9)",
        params![
            weights.semantic_weight,
            weights.skill_weight,
            weights.experience_weight,
            weights.trained_at.map(format_ts),
            weights.sample_count as i64,
            weights.confidence,
            weights.source.as_str(),
            weights.fingerprint,
            format_ts(Utc::now()),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    let version = tx.last_insert_rowid();

    tx.commit()
        .map_err(|e| to_storage_err(format!("publish commit: {e}")))?;

    Ok(LearningWeights {
        version: version as u64,
        ..weights.clone()
    })
}

pub fn load_active(conn: &Connection) -> TalentResult<Option<LearningWeights>> {
    let raw = conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM learning_weights WHERE is_active = 1"),
            [],
            RawWeights::from_row,
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    raw.map(RawWeights::into_weights).transpose()
}

/// Newest first.
pub fn history(conn: &Connection, limit: usize) -> TalentResult<Vec<LearningWeights>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {COLUMNS} FROM learning_weights ORDER BY version DESC LIMIT ?1"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![limit as i64], RawWeights::from_row)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row.map_err(|e| to_storage_err(e.to_string()))?.into_weights()?);
    }
    Ok(out)
}

struct RawWeights {
    version: i64,
    semantic: f64,
    skill: f64,
    experience: f64,
    trained_at: Option<String>,
    sample_count: i64,
    confidence: f64,
    source: String,
    fingerprint: Option<String>,
}

impl RawWeights {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            version: row.get(0)?,
            semantic: row.get(1)?,
            skill: row.get(2)?,
            experience: row.get(3)?,
            trained_at: row.get(4)?,
            sample_count: row.get(5)?,
            confidence: row.get(6)?,
            source: row.get(7)?,
            fingerprint: row.get(8)?,
        })
    }

    fn into_weights(self) -> TalentResult<LearningWeights> {
        let source = WeightSource::parse(&self.source)
            .ok_or_else(|| to_storage_err(format!("unknown weight source {:?}", self.source)))?;
        Ok(LearningWeights {
            version: self.version as u64,
            semantic_weight: self.semantic,
            skill_weight: self.skill,
            experience_weight: self.experience,
            trained_at: self.trained_at.as_deref().map(parse_ts).transpose()?,
            sample_count: self.sample_count as usize,
            confidence: self.confidence,
            source,
            fingerprint: self.fingerprint,
        })
    }
}
