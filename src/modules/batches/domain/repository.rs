/// Repository trait for batch persistence
///
/// The store is the only source of mutual exclusion: `register` relies on a
/// uniqueness constraint and `transition` is a compare-and-swap on `status`.
/// No in-process locks are taken by callers.
use crate::modules::batches::domain::entities::{BatchId, BatchSummary};
use crate::modules::batches::domain::value_objects::BatchStatus;
use crate::shared::errors::AppResult;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BatchRepository: Send + Sync {
    /// Insert a new batch in `notstarted`.
    /// Fails with `DuplicateFilename` if the name is taken; check and insert are one step.
    async fn register(&self, filename: &str, payload: &str) -> AppResult<BatchId>;

    /// All batches ordered by filename ascending
    async fn list(&self) -> AppResult<Vec<BatchSummary>>;

    async fn find_by_id(&self, id: BatchId) -> AppResult<Option<BatchSummary>>;

    async fn find_by_filename(&self, filename: &str) -> AppResult<Option<BatchSummary>>;

    /// Raw payload text, or `NotFound`
    async fn get_payload(&self, id: BatchId) -> AppResult<String>;

    /// Conditional update of `status` from `expected` to `next`.
    ///
    /// Fails with `InvalidTransition` if `next` is not the single forward step
    /// from `expected`, `NotFound` if the batch does not exist and
    /// `StatusMismatch` if the stored status differs from `expected` at the
    /// moment of the update.
    async fn transition(
        &self,
        id: BatchId,
        expected: &BatchStatus,
        next: &BatchStatus,
    ) -> AppResult<()>;
}
