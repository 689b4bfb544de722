use super::state::AppState;
use crate::modules::results::{ProcessedLead, ResultOrder};
use crate::shared::errors::AppResult;
use crate::log_debug;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListResultsRequest {
    #[serde(default)]
    pub order: ResultOrder,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeduplicateResultsRequest {
    /// Must be `true`; the deletion cannot be undone
    #[serde(default)]
    pub confirmed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeduplicateResultsResponse {
    pub removed: usize,
    pub remaining: i64,
}

pub async fn list_results(
    state: &AppState,
    request: ListResultsRequest,
) -> AppResult<Vec<ProcessedLead>> {
    state.result_repo.list(request.order).await
}

pub async fn count_results(state: &AppState) -> AppResult<i64> {
    state.result_repo.count().await
}

pub async fn deduplicate_results(
    state: &AppState,
    request: DeduplicateResultsRequest,
) -> AppResult<DeduplicateResultsResponse> {
    log_debug!(
        "deduplicate_results command called - confirmed: {}",
        request.confirmed
    );
    let removed = state.dedup_service.deduplicate(request.confirmed).await?;
    let remaining = state.result_repo.count().await?;

    Ok(DeduplicateResultsResponse { removed, remaining })
}
