//! Append and windowed reads on the interaction ledger.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};

use talent_core::errors::TalentResult;
use talent_core::{ComponentScores, InteractionType, RecruiterInteraction};

use super::{format_ts, parse_ts};
use crate::to_storage_err;

const COLUMNS: &str = "id, job_id, candidate_id, recruiter_id, session_id, interaction_type,
    search_rank, semantic_score, skill_overlap_score, experience_score, reward, timestamp";

/// Append one interaction. Re-appending the same id is a no-op, so a
/// retried write cannot duplicate a record. Returns whether a row was added.
pub fn append(conn: &Connection, interaction: &RecruiterInteraction) -> TalentResult<bool> {
    let scores = interaction.original_scores_at_time;
    let inserted = conn
        .execute(
            "INSERT INTO interaction_ledger (
                id, job_id, candidate_id, recruiter_id, session_id, interaction_type,
                search_rank, semantic_score, skill_overlap_score, experience_score,
                reward, timestamp
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            ON CONFLICT(id) DO NOTHING",
            params![
                interaction.id,
                interaction.job_id,
                interaction.candidate_id,
                interaction.recruiter_id,
                interaction.session_id,
                interaction.interaction_type.as_str(),
                interaction.search_rank_at_time.map(i64::from),
                scores.map(|s| s.semantic),
                scores.map(|s| s.skill_overlap),
                scores.map(|s| s.experience),
                interaction.reward,
                format_ts(interaction.timestamp),
            ],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(inserted == 1)
}

/// The newest `limit` interactions at or after `since`, in append order.
pub fn training_window(
    conn: &Connection,
    since: DateTime<Utc>,
    limit: usize,
) -> TalentResult<Vec<RecruiterInteraction>> {
    let sql = format!(
        "SELECT {COLUMNS} FROM (
            SELECT seq, {COLUMNS} FROM interaction_ledger
            WHERE timestamp >= ?1
            ORDER BY seq DESC
            LIMIT ?2
        ) ORDER BY seq ASC"
    );
    query(conn, &sql, params![format_ts(since), limit as i64])
}

fn query(
    conn: &Connection,
    sql: &str,
    params: impl rusqlite::Params,
) -> TalentResult<Vec<RecruiterInteraction>> {
    let mut stmt = conn
        .prepare(sql)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params, RawInteraction::from_row)
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut out = Vec::new();
    for row in rows {
        let raw = row.map_err(|e| to_storage_err(e.to_string()))?;
        out.push(raw.into_interaction()?);
    }
    Ok(out)
}

struct RawInteraction {
    id: String,
    job_id: String,
    candidate_id: String,
    recruiter_id: String,
    session_id: Option<String>,
    interaction_type: String,
    search_rank: Option<i64>,
    semantic: Option<f64>,
    skill_overlap: Option<f64>,
    experience: Option<f64>,
    reward: f64,
    timestamp: String,
}

impl RawInteraction {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            job_id: row.get(1)?,
            candidate_id: row.get(2)?,
            recruiter_id: row.get(3)?,
            session_id: row.get(4)?,
            interaction_type: row.get(5)?,
            search_rank: row.get(6)?,
            semantic: row.get(7)?,
            skill_overlap: row.get(8)?,
            experience: row.get(9)?,
            reward: row.get(10)?,
            timestamp: row.get(11)?,
        })
    }

    fn into_interaction(self) -> TalentResult<RecruiterInteraction> {
        let interaction_type: InteractionType =
            self.interaction_type.parse().map_err(to_storage_err)?;
        let original_scores_at_time = match (self.semantic, self.skill_overlap, self.experience) {
            (Some(semantic), Some(skill_overlap), Some(experience)) => Some(ComponentScores {
                semantic,
                skill_overlap,
                experience,
            }),
            _ => None,
        };
        Ok(RecruiterInteraction {
            id: self.id,
            job_id: self.job_id,
            candidate_id: self.candidate_id,
            recruiter_id: self.recruiter_id,
            session_id: self.session_id,
            interaction_type,
            search_rank_at_time: self.search_rank.and_then(|r| u32::try_from(r).ok()),
            original_scores_at_time,
            reward: self.reward,
            timestamp: parse_ts(&self.timestamp)?,
        })
    }
}
