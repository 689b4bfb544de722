use crate::modules::batches::domain::{BatchId, BatchRepository, BatchStatus};
use crate::modules::dispatch::domain::{DispatchOutcome, EnrichmentClient};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::{LogContext, TimedOperation};
use crate::{log_info, log_warn};
use std::sync::Arc;
use std::time::Duration;

/// Sends `notstarted` batches to the enrichment service and records the advance.
///
/// The precondition read, the external call and the status update are three
/// separate steps. Two concurrent callers can both pass the precondition and
/// both submit; only one of them advances the status. Delivery to the
/// enrichment service is therefore at-least-once.
pub struct DispatchService {
    batch_repo: Arc<dyn BatchRepository>,
    client: Arc<dyn EnrichmentClient>,
    timeout: Duration,
}

impl DispatchService {
    pub fn new(
        batch_repo: Arc<dyn BatchRepository>,
        client: Arc<dyn EnrichmentClient>,
        timeout: Duration,
    ) -> Self {
        Self {
            batch_repo,
            client,
            timeout,
        }
    }

    pub async fn dispatch(&self, batch_id: BatchId) -> AppResult<DispatchOutcome> {
        let batch = self
            .batch_repo
            .find_by_id(batch_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Batch {} not found", batch_id)))?;

        if batch.status != BatchStatus::NotStarted {
            return Err(AppError::PreconditionFailed(format!(
                "Batch '{}' has status '{}'; only '{}' batches can be dispatched",
                batch.filename,
                batch.status,
                BatchStatus::NotStarted
            )));
        }

        let payload = self.batch_repo.get_payload(batch_id).await?;

        LogContext::dispatch_call(batch_id, "starting", None);
        let timer = TimedOperation::new("dispatch batch");

        // Status stays untouched on any failure so the caller can dispatch again
        match tokio::time::timeout(self.timeout, self.client.submit(batch_id, &payload)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                log_warn!("Dispatch of batch {} failed: {}", batch_id, e);
                return Err(e);
            }
            Err(_) => {
                log_warn!(
                    "Dispatch of batch {} timed out after {:?}",
                    batch_id,
                    self.timeout
                );
                return Err(AppError::TransportError(format!(
                    "Enrichment call timed out after {}ms",
                    self.timeout.as_millis()
                )));
            }
        }

        LogContext::dispatch_call(batch_id, "acknowledged", Some(timer.elapsed_ms()));

        match self
            .batch_repo
            .transition(batch_id, &BatchStatus::NotStarted, &BatchStatus::InProgress)
            .await
        {
            Ok(()) => {
                log_info!(
                    "Batch '{}' (ID: {}) sent for processing, status now '{}'",
                    batch.filename,
                    batch_id,
                    BatchStatus::InProgress
                );
                Ok(DispatchOutcome::Dispatched { batch_id })
            }
            Err(AppError::StatusMismatch { actual, .. }) => {
                log_warn!(
                    "Batch {} was advanced to '{}' by a concurrent dispatch; treating as duplicate submission",
                    batch_id,
                    actual
                );
                Ok(DispatchOutcome::AlreadyAdvanced { batch_id })
            }
            Err(e) => Err(e),
        }
    }
}
