//! Background task: ledger retries, session sweeps, and retrains.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::engine::MatchingEngine;

/// Floor for the retry tick so a zero base delay does not spin.
const MIN_RETRY_TICK: Duration = Duration::from_millis(50);

pub struct BackgroundWorker {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl BackgroundWorker {
    /// Spawn on the current tokio runtime.
    pub fn spawn(engine: Arc<MatchingEngine>) -> Self {
        let (shutdown, rx) = watch::channel(false);
        let handle = tokio::spawn(run(engine, rx));
        Self { shutdown, handle }
    }

    /// Signal the loop to stop and wait for it. Pending ledger writes get
    /// one last attempt before the loop exits.
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        if let Err(e) = self.handle.await {
            error!(error = %e, "background worker panicked");
        }
    }
}

async fn run(engine: Arc<MatchingEngine>, mut shutdown: watch::Receiver<bool>) {
    let config = engine.config().clone();
    let mut retry = time::interval(
        Duration::from_millis(config.storage.retry_base_delay_ms).max(MIN_RETRY_TICK),
    );
    let mut sweep = time::interval(Duration::from_secs(config.session.sweep_interval_secs.max(1)));
    let mut schedule = time::interval(Duration::from_secs(config.learning.retrain_interval_secs.max(1)));
    for ticker in [&mut retry, &mut sweep, &mut schedule] {
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    }
    // The first tick of an interval fires immediately; skip it for the
    // scheduled retrain so startup does not train.
    schedule.tick().await;

    info!("background worker started");
    loop {
        tokio::select! {
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
            _ = retry.tick() => {
                if engine.pending_writes() > 0 {
                    let engine = engine.clone();
                    let report = blocking(move || engine.flush_pending_writes()).await;
                    if let Some(report) = report {
                        if report != Default::default() {
                            debug!(?report, "ledger retry pass");
                        }
                    }
                }
            }
            _ = sweep.tick() => {
                engine.sweep_sessions();
            }
            _ = schedule.tick() => {
                let engine = engine.clone();
                if let Some(Err(e)) = blocking(move || engine.run_scheduled_retrain()).await {
                    error!(error = %e, "scheduled retrain failed, previous weights kept");
                }
            }
            _ = engine.retrain_notify().notified() => {
                let engine = engine.clone();
                if let Some(Err(e)) = blocking(move || engine.run_requested_retrain()).await {
                    error!(error = %e, "feedback retrain failed, previous weights kept");
                }
            }
        }
    }

    let remaining = engine.writer().pending_len();
    if remaining > 0 {
        let engine = engine.clone();
        let report = blocking(move || engine.writer().drain_due(far_future())).await;
        info!(?report, "final ledger flush");
    }
    info!("background worker stopped");
}

/// Run SQLite and fitting work off the async executor.
async fn blocking<T, F>(f: F) -> Option<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(f).await {
        Ok(value) => Some(value),
        Err(e) => {
            error!(error = %e, "blocking task failed");
            None
        }
    }
}

fn far_future() -> std::time::Instant {
    std::time::Instant::now() + Duration::from_secs(24 * 60 * 60)
}
