use leads_ledger::{bootstrap, AppConfig};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    let (state, _database) = bootstrap(&config)?;

    let reconciler = Arc::new(state.reconciler(config.reconcile_interval));
    let mut snapshots = reconciler.subscribe();
    let mut worker = tokio::spawn(Arc::clone(&reconciler).run());
    log::info!("Reconciler initialized; press Ctrl+C to stop");

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            finished = &mut worker => {
                // The loop only returns after `stop`, so reaching here means it died
                finished?;
                anyhow::bail!("reconciler exited unexpectedly");
            }
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
                let latest = snapshots.borrow_and_update().clone();
                if let Some(snapshot) = latest {
                    let counts = &snapshot.status_counts;
                    log::info!(
                        "Batches: {} not started, {} in progress, {} complete, {} unknown; processed leads: {}",
                        counts.not_started,
                        counts.in_progress,
                        counts.complete,
                        counts.unknown,
                        snapshot.result_count
                    );
                }
            }
        }
    }

    reconciler.stop();
    worker.await?;
    Ok(())
}
