use crate::modules::batches::domain::{BatchId, BatchRepository, BatchStatus, BatchSummary};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::Validator;
use crate::{log_debug, log_info};
use std::sync::Arc;

pub struct BatchService {
    batch_repo: Arc<dyn BatchRepository>,
}

impl BatchService {
    pub fn new(batch_repo: Arc<dyn BatchRepository>) -> Self {
        Self { batch_repo }
    }

    /// Validate and register a new batch in `notstarted`
    pub async fn register(&self, filename: &str, payload: &str) -> AppResult<BatchSummary> {
        Validator::validate_filename(filename)?;
        Validator::validate_payload(payload)?;

        let id = self.batch_repo.register(filename, payload).await?;

        Ok(BatchSummary {
            id,
            filename: filename.to_string(),
            status: BatchStatus::NotStarted,
        })
    }

    pub async fn list(&self) -> AppResult<Vec<BatchSummary>> {
        self.batch_repo.list().await
    }

    pub async fn get(&self, id: BatchId) -> AppResult<BatchSummary> {
        self.batch_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Batch {} not found", id)))
    }

    pub async fn get_by_filename(&self, filename: &str) -> AppResult<BatchSummary> {
        self.batch_repo
            .find_by_filename(filename)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Batch '{}' not found", filename)))
    }

    /// Completion write-back from the enrichment service: `inprogress -> complete`.
    ///
    /// Completing an already complete batch is accepted without change so that
    /// the callback can be delivered more than once.
    pub async fn complete(&self, id: BatchId) -> AppResult<BatchSummary> {
        match self
            .batch_repo
            .transition(id, &BatchStatus::InProgress, &BatchStatus::Complete)
            .await
        {
            Ok(()) => {
                log_info!("Batch {} marked complete", id);
            }
            Err(AppError::StatusMismatch { actual, .. })
                if BatchStatus::parse(&actual) == BatchStatus::Complete =>
            {
                log_debug!("Batch {} already complete, ignoring repeated completion", id);
            }
            Err(e) => return Err(e),
        }

        self.get(id).await
    }
}
