//! Counts and per-type reward averages over the ledger.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use talent_core::errors::TalentResult;
use talent_core::models::TypeBreakdown;
use talent_core::InteractionType;

use super::format_ts;
use crate::to_storage_err;

pub fn count(conn: &Connection) -> TalentResult<usize> {
    count_where(conn, "SELECT COUNT(*) FROM interaction_ledger", [])
}

pub fn count_since(conn: &Connection, since: DateTime<Utc>) -> TalentResult<usize> {
    count_where(
        conn,
        "SELECT COUNT(*) FROM interaction_ledger WHERE timestamp >= ?1",
        params![format_ts(since)],
    )
}

/// Interactions with both rank and scores recovered.
pub fn count_attributed(conn: &Connection) -> TalentResult<usize> {
    count_where(
        conn,
        "SELECT COUNT(*) FROM interaction_ledger
         WHERE search_rank IS NOT NULL
           AND semantic_score IS NOT NULL
           AND skill_overlap_score IS NOT NULL
           AND experience_score IS NOT NULL",
        [],
    )
}

/// Count and average reward grouped by interaction type.
pub fn breakdown_by_type(
    conn: &Connection,
) -> TalentResult<BTreeMap<InteractionType, TypeBreakdown>> {
    let mut stmt = conn
        .prepare(
            "SELECT interaction_type, COUNT(*), AVG(reward) FROM interaction_ledger
             GROUP BY interaction_type",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, f64>(2)?,
            ))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut out = BTreeMap::new();
    for row in rows {
        let (type_str, count, avg_reward) = row.map_err(|e| to_storage_err(e.to_string()))?;
        if let Ok(kind) = type_str.parse::<InteractionType>() {
            out.insert(
                kind,
                TypeBreakdown {
                    count: count as usize,
                    avg_reward,
                },
            );
        }
    }
    Ok(out)
}

fn count_where(conn: &Connection, sql: &str, params: impl rusqlite::Params) -> TalentResult<usize> {
    let n: i64 = conn
        .query_row(sql, params, |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(n as usize)
}
