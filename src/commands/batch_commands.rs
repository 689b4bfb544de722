use super::state::AppState;
use crate::modules::batches::{BatchId, BatchStatus, BatchSummary};
use crate::modules::dispatch::DispatchOutcome;
use crate::shared::errors::AppResult;
use crate::{log_debug, log_error};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterBatchRequest {
    pub filename: String,
    pub payload: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchIdRequest {
    pub id: BatchId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchFilenameRequest {
    pub filename: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchStatusResponse {
    pub id: BatchId,
    pub filename: String,
    pub status: BatchStatus,
    pub color: String,
    /// Whether `dispatch_batch` would pass its precondition right now
    pub dispatchable: bool,
}

impl From<BatchSummary> for BatchStatusResponse {
    fn from(summary: BatchSummary) -> Self {
        Self {
            color: summary.status.display_color().to_string(),
            dispatchable: summary.status == BatchStatus::NotStarted,
            id: summary.id,
            filename: summary.filename,
            status: summary.status,
        }
    }
}

pub async fn register_batch(
    state: &AppState,
    request: RegisterBatchRequest,
) -> AppResult<BatchSummary> {
    log_debug!("register_batch command called - filename: {}", request.filename);
    state
        .batch_service
        .register(&request.filename, &request.payload)
        .await
}

pub async fn list_batches(state: &AppState) -> AppResult<Vec<BatchSummary>> {
    state.batch_service.list().await
}

pub async fn get_batch_status(
    state: &AppState,
    request: BatchIdRequest,
) -> AppResult<BatchStatusResponse> {
    state
        .batch_service
        .get(request.id)
        .await
        .map(BatchStatusResponse::from)
}

pub async fn get_batch_status_by_filename(
    state: &AppState,
    request: BatchFilenameRequest,
) -> AppResult<BatchStatusResponse> {
    state
        .batch_service
        .get_by_filename(&request.filename)
        .await
        .map(BatchStatusResponse::from)
}

pub async fn dispatch_batch(
    state: &AppState,
    request: BatchIdRequest,
) -> AppResult<DispatchOutcome> {
    log_debug!("dispatch_batch command called - id: {}", request.id);
    state
        .dispatch_service
        .dispatch(request.id)
        .await
        .map_err(|e| {
            log_error!("Error processing leads for batch {}: {}", request.id, e);
            e
        })
}

/// Write-back from the enrichment service once all results for a batch are stored
pub async fn complete_batch(
    state: &AppState,
    request: BatchIdRequest,
) -> AppResult<BatchStatusResponse> {
    state
        .batch_service
        .complete(request.id)
        .await
        .map(BatchStatusResponse::from)
}
