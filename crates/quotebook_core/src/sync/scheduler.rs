//! Periodic reconcile task with explicit start/stop.

use crate::sync::reconciler::{Reconciler, SyncOutcome};
use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Reference reconcile period.
pub const DEFAULT_SYNC_INTERVAL: Duration = Duration::from_secs(60);

/// Handle to a running periodic sync task.
///
/// Dropping the handle aborts the task; call `stop` for a graceful shutdown
/// that lets an in-flight reconcile finish.
pub struct SyncHandle {
    shutdown: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
}

impl SyncHandle {
    /// Signals shutdown and waits for the task to exit.
    pub async fn stop(mut self) {
        let _ = self.shutdown.send(true);
        if let Some(task) = self.task.take() {
            if let Err(err) = task.await {
                warn!("event=sync_schedule module=sync status=error error={}", err);
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for SyncHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Runs `reconciler.reconcile()` now and then every `period`.
///
/// Must be called inside a tokio runtime. Ticks missed while a reconcile is
/// running are skipped rather than replayed.
pub fn start_periodic_sync(reconciler: Arc<Reconciler>, period: Duration) -> SyncHandle {
    let period = period.max(Duration::from_millis(1));
    let (shutdown, mut shutdown_rx) = watch::channel(false);

    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        info!(
            "event=sync_schedule module=sync status=start period_ms={}",
            period.as_millis()
        );

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let outcome = reconciler.reconcile().await;
                    if !matches!(outcome, SyncOutcome::Failed(_)) {
                        debug!("event=sync_tick module=sync status=ok outcome={:?}", outcome);
                    }
                }
                changed = shutdown_rx.changed() => {
                    if changed.is_err() || *shutdown_rx.borrow() {
                        break;
                    }
                }
            }
        }

        info!("event=sync_schedule module=sync status=stopped");
    });

    SyncHandle {
        shutdown,
        task: Some(task),
    }
}
