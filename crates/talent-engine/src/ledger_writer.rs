//! Ledger writes that never fail the caller.
//!
//! One inline attempt; on failure the interaction joins a pending queue
//! that the background worker drains with exponential backoff until
//! `max_write_attempts` is reached.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use talent_core::config::StorageConfig;
use talent_core::errors::StorageError;
use talent_core::traits::IInteractionLedger;
use talent_core::{RecruiterInteraction, TalentError};
use tracing::{debug, error, warn};

const MAX_BACKOFF: Duration = Duration::from_secs(30);

struct PendingWrite {
    interaction: RecruiterInteraction,
    attempts: u32,
    next_attempt_at: Instant,
}

/// Outcome of one drain pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrainReport {
    pub persisted: usize,
    pub requeued: usize,
    pub dropped: usize,
}

pub struct LedgerWriter {
    ledger: Arc<dyn IInteractionLedger>,
    pending: Mutex<VecDeque<PendingWrite>>,
    max_attempts: u32,
    base_delay: Duration,
}

impl LedgerWriter {
    pub fn new(ledger: Arc<dyn IInteractionLedger>, config: &StorageConfig) -> Self {
        Self {
            ledger,
            pending: Mutex::new(VecDeque::new()),
            max_attempts: config.max_write_attempts.max(1),
            base_delay: Duration::from_millis(config.retry_base_delay_ms),
        }
    }

    /// Try once. Returns whether the interaction is durable now; if not it
    /// has been queued for retry.
    pub fn write(&self, interaction: RecruiterInteraction) -> bool {
        match self.ledger.append(&interaction) {
            Ok(()) => true,
            Err(e) => {
                warn!(interaction_id = %interaction.id, error = %e, "ledger append failed, queued for retry");
                if self.max_attempts <= 1 {
                    error!(
                        interaction_id = %interaction.id,
                        error = %exhausted(1, &e),
                        "ledger retries disabled, interaction dropped"
                    );
                    return false;
                }
                self.enqueue(PendingWrite {
                    next_attempt_at: Instant::now() + self.backoff(1),
                    interaction,
                    attempts: 1,
                });
                false
            }
        }
    }

    pub fn pending_len(&self) -> usize {
        self.lock().len()
    }

    /// Retry every queued write due at `now`.
    pub fn drain_due(&self, now: Instant) -> DrainReport {
        let due: Vec<PendingWrite> = {
            let mut queue = self.lock();
            let (due, waiting): (VecDeque<_>, VecDeque<_>) =
                queue.drain(..).partition(|p| p.next_attempt_at <= now);
            *queue = waiting;
            due.into_iter().collect()
        };

        let mut report = DrainReport::default();
        for mut write in due {
            match self.ledger.append(&write.interaction) {
                Ok(()) => {
                    debug!(interaction_id = %write.interaction.id, attempts = write.attempts + 1, "queued interaction persisted");
                    report.persisted += 1;
                }
                Err(e) => {
                    write.attempts += 1;
                    if write.attempts >= self.max_attempts {
                        error!(
                            interaction_id = %write.interaction.id,
                            error = %exhausted(write.attempts, &e),
                            "interaction dropped"
                        );
                        report.dropped += 1;
                    } else {
                        warn!(interaction_id = %write.interaction.id, attempts = write.attempts, error = %e, "ledger retry failed");
                        write.next_attempt_at = now + self.backoff(write.attempts);
                        self.enqueue(write);
                        report.requeued += 1;
                    }
                }
            }
        }
        report
    }

    /// Earliest pending retry, if any.
    pub fn next_due(&self) -> Option<Instant> {
        self.lock().iter().map(|p| p.next_attempt_at).min()
    }

    fn backoff(&self, attempts: u32) -> Duration {
        let factor = 1u32 << attempts.saturating_sub(1).min(16);
        self.base_delay.saturating_mul(factor).min(MAX_BACKOFF)
    }

    fn enqueue(&self, write: PendingWrite) {
        self.lock().push_back(write);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<PendingWrite>> {
        self.pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn exhausted(attempts: u32, last: &TalentError) -> StorageError {
    StorageError::RetriesExhausted {
        attempts,
        reason: last.to_string(),
    }
}
