// Periodic progress polling for the running analysis job.
//
// While running, a timer task fires every `interval` and spawns one
// independent query per tick, so a slow or failing query never delays the
// next one. The queries live in a JoinSet owned by the timer task, so
// aborting the timer cancels whatever is still in flight. Results land in a
// watch channel the poller owns. Every run has an epoch; a query that
// resolves after `stop()` finds a newer epoch and drops its result.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use gachalog_core::identity::TaskId;
use gachalog_core::protocol::ProgressStatus;
use tokio::sync::watch;
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, warn};

use crate::backend::GachaBackend;

/// Poll period used when none is configured.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

pub struct ProgressPoller {
    backend: Arc<dyn GachaBackend>,
    interval: Duration,
    status: Arc<watch::Sender<Option<ProgressStatus>>>,
    epoch: Arc<AtomicU64>,
    handle: Option<JoinHandle<()>>,
}

impl ProgressPoller {
    pub fn new(backend: Arc<dyn GachaBackend>, interval: Duration) -> Self {
        let (status, _) = watch::channel(None);
        ProgressPoller {
            backend,
            interval,
            status: Arc::new(status),
            epoch: Arc::new(AtomicU64::new(0)),
            handle: None,
        }
    }

    /// Receiver for the latest status; `None` while stopped or before the
    /// first usable update.
    pub fn subscribe(&self) -> watch::Receiver<Option<ProgressStatus>> {
        self.status.subscribe()
    }

    pub fn status(&self) -> Option<ProgressStatus> {
        self.status.borrow().clone()
    }

    /// Whether the timer handle is held.
    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Begin polling for `task_id`. Restarts if already running.
    pub fn start(&mut self, task_id: TaskId) {
        self.stop();

        let epoch = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        let backend = Arc::clone(&self.backend);
        let status = Arc::clone(&self.status);
        let current = Arc::clone(&self.epoch);
        let period = self.interval;

        debug!(task_id = %task_id, ?period, "progress poller started");

        self.handle = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut in_flight = JoinSet::new();
            loop {
                ticker.tick().await;
                while in_flight.try_join_next().is_some() {}
                in_flight.spawn(poll_once(
                    Arc::clone(&backend),
                    task_id.clone(),
                    Arc::clone(&status),
                    Arc::clone(&current),
                    epoch,
                ));
            }
        }));
    }

    /// Stop polling and clear the status. Safe to call at any time.
    pub fn stop(&mut self) {
        let Some(handle) = self.handle.take() else {
            return;
        };
        handle.abort();
        self.epoch.fetch_add(1, Ordering::SeqCst);
        self.status.send_replace(None);
        debug!("progress poller stopped");
    }
}

impl Drop for ProgressPoller {
    fn drop(&mut self) {
        self.stop();
    }
}

/// One tick: query, validate, publish if this run is still current.
async fn poll_once(
    backend: Arc<dyn GachaBackend>,
    task_id: TaskId,
    status: Arc<watch::Sender<Option<ProgressStatus>>>,
    current: Arc<AtomicU64>,
    epoch: u64,
) {
    let payload = match backend.fetch_progress(&task_id).await {
        Ok(payload) => payload,
        Err(e) => {
            warn!("Failed to fetch progress for task {}: {}", task_id, e);
            return;
        }
    };

    let Some(next) = payload.into_status() else {
        return;
    };

    // The epoch check runs under the watch lock so it cannot interleave
    // with stop() clearing the slot.
    let published = status.send_if_modified(|slot| {
        if current.load(Ordering::SeqCst) != epoch {
            return false;
        }
        *slot = Some(next);
        true
    });
    if !published {
        debug!(task_id = %task_id, "discarding progress from a stopped run");
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
