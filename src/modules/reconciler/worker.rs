/// Periodic read-only refresh of batch and result state
///
/// Replaces a UI auto-refresh timer: every tick the worker lists batches,
/// counts results and publishes the snapshot on a watch channel. It never
/// writes, so it can run on any cadence next to user-driven operations.
use crate::modules::batches::domain::BatchRepository;
use crate::modules::reconciler::snapshot::DashboardSnapshot;
use crate::modules::results::domain::ResultRepository;
use crate::shared::errors::AppResult;
use crate::{log_debug, log_error, log_info};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

pub struct ReconcilerWorker {
    batch_repo: Arc<dyn BatchRepository>,
    result_repo: Arc<dyn ResultRepository>,
    interval: Duration,
    shutdown: CancellationToken,
    snapshots: watch::Sender<Option<Arc<DashboardSnapshot>>>,
    refreshes: AtomicU64,
    failures: AtomicU64,
}

/// Worker statistics for monitoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconcilerStatistics {
    pub refreshes: u64,
    pub failures: u64,
}

impl ReconcilerWorker {
    pub fn new(
        batch_repo: Arc<dyn BatchRepository>,
        result_repo: Arc<dyn ResultRepository>,
        interval: Duration,
    ) -> Self {
        let (snapshots, _) = watch::channel(None);
        Self {
            batch_repo,
            result_repo,
            interval,
            shutdown: CancellationToken::new(),
            snapshots,
            refreshes: AtomicU64::new(0),
            failures: AtomicU64::new(0),
        }
    }

    /// Receive every snapshot published from now on
    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<DashboardSnapshot>>> {
        self.snapshots.subscribe()
    }

    /// Most recently published snapshot, if any
    pub fn latest(&self) -> Option<Arc<DashboardSnapshot>> {
        self.snapshots.borrow().clone()
    }

    /// Build and publish one snapshot
    pub async fn refresh_once(&self) -> AppResult<Arc<DashboardSnapshot>> {
        let batches = self.batch_repo.list().await?;
        let result_count = self.result_repo.count().await?;

        let snapshot = Arc::new(DashboardSnapshot::new(batches, result_count));
        self.snapshots.send_replace(Some(Arc::clone(&snapshot)));
        self.refreshes.fetch_add(1, Ordering::Relaxed);

        log_debug!(
            "Reconciled {} batches ({} dispatchable), {} processed leads",
            snapshot.status_counts.total(),
            snapshot.status_counts.not_started,
            snapshot.result_count
        );
        Ok(snapshot)
    }

    /// Run the refresh loop until `stop` is called.
    ///
    /// Call it with tokio::spawn to run in the background.
    pub async fn run(self: Arc<Self>) {
        log_info!(
            "Reconciler started with a {}s refresh interval",
            self.interval.as_secs()
        );

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    log_info!("Reconciler stopped");
                    break;
                }
                _ = ticker.tick() => {
                    if let Err(e) = self.refresh_once().await {
                        self.failures.fetch_add(1, Ordering::Relaxed);
                        log_error!("Reconciliation failed: {}", e);
                    }
                }
            }
        }
    }

    /// Stop the refresh loop
    pub fn stop(&self) {
        self.shutdown.cancel();
        log_info!("Reconciler stop requested");
    }

    pub fn statistics(&self) -> ReconcilerStatistics {
        ReconcilerStatistics {
            refreshes: self.refreshes.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
        }
    }
}
