/// Repository trait for processed leads
///
/// Rows are inserted by the enrichment service, never by this crate. The only
/// mutation offered here is the set-based removal of superseded duplicates.
use crate::modules::results::domain::entities::{ProcessedLead, ResultOrder};
use crate::shared::errors::AppResult;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResultRepository: Send + Sync {
    /// Total number of stored rows
    async fn count(&self) -> AppResult<i64>;

    async fn list(&self, order: ResultOrder) -> AppResult<Vec<ProcessedLead>>;

    /// Delete every row whose username also appears on a row with a smaller id.
    ///
    /// Runs as one statement inside one transaction: either all superseded rows
    /// are removed or none are. Returns the number of rows removed.
    async fn delete_superseded(&self) -> AppResult<usize>;
}
