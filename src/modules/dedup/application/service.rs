use crate::modules::results::domain::ResultRepository;
use crate::shared::errors::{AppError, AppResult};
use crate::{log_info, log_warn};
use std::sync::Arc;

/// Removes processed leads that share a username with an earlier row.
///
/// The deletion is permanent. The caller has to pass `confirmed = true`
/// explicitly; anything else is refused before the store is touched.
pub struct DeduplicationService {
    result_repo: Arc<dyn ResultRepository>,
}

impl DeduplicationService {
    pub fn new(result_repo: Arc<dyn ResultRepository>) -> Self {
        Self { result_repo }
    }

    /// Returns the number of rows removed
    pub async fn deduplicate(&self, confirmed: bool) -> AppResult<usize> {
        if !confirmed {
            log_warn!("Deduplication requested without confirmation; nothing deleted");
            return Err(AppError::ConfirmationRequired(
                "Deduplication permanently deletes duplicate leads; repeat the request with confirmation".to_string(),
            ));
        }

        let removed = self.result_repo.delete_superseded().await?;
        log_info!(
            "Deduplication complete. {} duplicate rows removed",
            removed
        );
        Ok(removed)
    }
}
