//! Entry cache on moka with per-entry expiry taken from `expires_at`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use moka::sync::Cache;
use moka::Expiry;
use talent_core::config::SessionConfig;
use talent_core::{MatchResult, ScoreWeights, SearchSessionCacheEntry};
use tracing::debug;

use crate::registry::{SessionInfo, SessionRegistry};

/// Expired sessions are also pruned every this many `put` calls, so the
/// registry stays bounded without a background sweeper.
const PRUNE_EVERY_PUTS: u64 = 64;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionKey {
    pub session_id: String,
    pub job_id: String,
    pub candidate_id: String,
}

impl SessionKey {
    pub fn new(session_id: &str, job_id: &str, candidate_id: &str) -> Self {
        Self {
            session_id: session_id.to_string(),
            job_id: job_id.to_string(),
            candidate_id: candidate_id.to_string(),
        }
    }
}

/// Remaining lifetime of each entry, derived from its own `expires_at`.
struct EntryExpiry;

impl EntryExpiry {
    fn remaining(entry: &SearchSessionCacheEntry) -> Duration {
        (entry.expires_at - Utc::now())
            .to_std()
            .unwrap_or(Duration::ZERO)
    }
}

impl Expiry<SessionKey, Arc<SearchSessionCacheEntry>> for EntryExpiry {
    fn expire_after_create(
        &self,
        _key: &SessionKey,
        value: &Arc<SearchSessionCacheEntry>,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(Self::remaining(value))
    }

    fn expire_after_update(
        &self,
        _key: &SessionKey,
        value: &Arc<SearchSessionCacheEntry>,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(Self::remaining(value))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionCacheStats {
    pub entries: u64,
    pub sessions: usize,
    pub hits: u64,
    pub misses: u64,
}

/// The search session cache.
pub struct SessionCache {
    entries: Cache<SessionKey, Arc<SearchSessionCacheEntry>>,
    registry: SessionRegistry,
    default_ttl: Duration,
    puts: AtomicU64,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl SessionCache {
    pub fn new(config: &SessionConfig) -> Self {
        let entries = Cache::builder()
            .max_capacity(config.max_entries)
            .expire_after(EntryExpiry)
            .build();
        Self {
            entries,
            registry: SessionRegistry::default(),
            default_ttl: Duration::from_secs(config.ttl_secs),
            puts: AtomicU64::new(0),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Store `entries` under `session_id`, each living for `ttl` from now.
    /// Any `session_id`, `created_at`, or `expires_at` already on the
    /// entries is overwritten.
    pub fn put(&self, session_id: &str, entries: Vec<SearchSessionCacheEntry>, ttl: Duration) {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::from_std(ttl).unwrap_or_else(|_| chrono::Duration::days(3650));
        let mut per_job: Vec<(String, usize, bool)> = Vec::new();
        for mut entry in entries {
            entry.session_id = session_id.to_string();
            entry.created_at = now;
            entry.expires_at = expires_at;
            match per_job.iter_mut().find(|(job, _, _)| *job == entry.job_id) {
                Some(slot) => {
                    slot.1 += 1;
                    slot.2 |= entry.blind_mode;
                }
                None => per_job.push((entry.job_id.clone(), 1, entry.blind_mode)),
            }
            let key = SessionKey::new(session_id, &entry.job_id, &entry.candidate_id);
            self.entries.insert(key, Arc::new(entry));
        }
        for (job_id, count, blind) in per_job {
            self.registry
                .record(session_id, &job_id, count, blind, now, expires_at);
        }
        if (self.puts.fetch_add(1, Ordering::Relaxed) + 1) % PRUNE_EVERY_PUTS == 0 {
            self.registry.prune(now);
        }
    }

    /// Cache one ranked result list with the default TTL.
    pub fn put_ranking(
        &self,
        session_id: &str,
        matches: &[MatchResult],
        weights: &ScoreWeights,
        blind_mode: bool,
    ) {
        let now = Utc::now();
        let entries = matches
            .iter()
            .map(|m| SearchSessionCacheEntry {
                session_id: session_id.to_string(),
                job_id: m.job_id.clone(),
                candidate_id: m.candidate_id.clone(),
                rank: m.rank,
                breakdown: m.breakdown.clone(),
                weights_used: *weights,
                blind_mode,
                created_at: now,
                expires_at: now,
            })
            .collect();
        self.put(session_id, entries, self.default_ttl);
    }

    /// Ranking context for the triple, if still live.
    pub fn get(
        &self,
        session_id: &str,
        job_id: &str,
        candidate_id: &str,
    ) -> Option<SearchSessionCacheEntry> {
        let key = SessionKey::new(session_id, job_id, candidate_id);
        let found = self.entries.get(&key).and_then(|entry| {
            if entry.is_expired(Utc::now()) {
                self.entries.invalidate(&key);
                None
            } else {
                Some(entry.as_ref().clone())
            }
        });
        match &found {
            Some(_) => self.hits.fetch_add(1, Ordering::Relaxed),
            None => {
                debug!(session_id, job_id, candidate_id, "session cache miss");
                self.misses.fetch_add(1, Ordering::Relaxed)
            }
        };
        found
    }

    pub fn session(&self, session_id: &str) -> Option<SessionInfo> {
        self.registry
            .get(session_id)
            .filter(|info| info.expires_at > Utc::now())
    }

    /// Evict expired entries and sessions now rather than lazily. Returns
    /// the number of sessions dropped.
    pub fn sweep(&self) -> usize {
        self.entries.run_pending_tasks();
        let pruned = self.registry.prune(Utc::now());
        if pruned > 0 {
            debug!(pruned, remaining = self.registry.len(), "session sweep");
        }
        pruned
    }

    pub fn stats(&self) -> SessionCacheStats {
        SessionCacheStats {
            entries: self.entries.entry_count(),
            sessions: self.registry.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}
