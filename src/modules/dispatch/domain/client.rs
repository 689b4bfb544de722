use async_trait::async_trait;

use crate::modules::batches::domain::BatchId;
use crate::shared::errors::AppResult;

/// Port (interface) for the external enrichment service
///
/// One call per submission, no retries. A success means the service has
/// acknowledged receipt; results arrive later and out-of-band.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnrichmentClient: Send + Sync {
    /// Submit the raw CSV text of a batch.
    ///
    /// The batch id travels out-of-band so the service can correlate its
    /// results. Fails with `TransportError` or `NonSuccessResponse`.
    async fn submit(&self, batch_id: BatchId, payload: &str) -> AppResult<()>;
}
