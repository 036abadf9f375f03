//! Per-session summaries kept alongside the entry cache.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::sync::Arc;

/// Audit view of one search session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionInfo {
    pub session_id: String,
    pub job_ids: Vec<String>,
    pub entries: usize,
    pub blind_mode: bool,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

#[derive(Default)]
pub(crate) struct SessionRegistry {
    sessions: Arc<DashMap<String, SessionInfo>>,
}

impl SessionRegistry {
    pub(crate) fn record(
        &self,
        session_id: &str,
        job_id: &str,
        entries: usize,
        blind_mode: bool,
        now: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) {
        let mut info = self
            .sessions
            .entry(session_id.to_string())
            .or_insert_with(|| SessionInfo {
                session_id: session_id.to_string(),
                job_ids: Vec::new(),
                entries: 0,
                blind_mode,
                created_at: now,
                expires_at,
            });
        if !info.job_ids.iter().any(|j| j == job_id) {
            info.job_ids.push(job_id.to_string());
        }
        info.entries += entries;
        info.blind_mode |= blind_mode;
        if expires_at > info.expires_at {
            info.expires_at = expires_at;
        }
    }

    pub(crate) fn get(&self, session_id: &str) -> Option<SessionInfo> {
        self.sessions.get(session_id).map(|r| r.clone())
    }

    pub(crate) fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Drop sessions whose last entry has expired. Returns how many went.
    pub(crate) fn prune(&self, now: DateTime<Utc>) -> usize {
        let mut removed = 0;
        self.sessions.retain(|_, info| {
            let live = info.expires_at > now;
            if !live {
                removed += 1;
            }
            live
        });
        removed
    }
}
