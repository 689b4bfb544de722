use crate::modules::batches::{BatchRepository, BatchRepositoryImpl, BatchService};
use crate::modules::dedup::DeduplicationService;
use crate::modules::dispatch::{DispatchService, EnrichmentClient, WebhookEnrichmentClient};
use crate::modules::reconciler::ReconcilerWorker;
use crate::modules::results::{ResultRepository, ResultRepositoryImpl};
use crate::shared::config::AppConfig;
use crate::shared::errors::AppResult;
use crate::shared::Database;
use std::sync::Arc;
use std::time::Duration;

/// Services shared by every boundary command
///
/// Holds no per-request data: selections and uploads belong to the caller.
#[derive(Clone)]
pub struct AppState {
    pub batch_service: Arc<BatchService>,
    pub dispatch_service: Arc<DispatchService>,
    pub dedup_service: Arc<DeduplicationService>,
    pub batch_repo: Arc<dyn BatchRepository>,
    pub result_repo: Arc<dyn ResultRepository>,
}

impl AppState {
    /// Wire the PostgreSQL repositories and the webhook client
    pub fn from_database(database: &Database, config: &AppConfig) -> AppResult<Self> {
        let batch_repo: Arc<dyn BatchRepository> =
            Arc::new(BatchRepositoryImpl::new(database.pool().clone()));
        let result_repo: Arc<dyn ResultRepository> =
            Arc::new(ResultRepositoryImpl::new(database.pool().clone()));
        let client: Arc<dyn EnrichmentClient> = Arc::new(WebhookEnrichmentClient::new(
            config.enrichment_webhook_url.clone(),
            config.dispatch_timeout,
        )?);

        Ok(Self::from_parts(
            batch_repo,
            result_repo,
            client,
            config.dispatch_timeout,
        ))
    }

    pub fn from_parts(
        batch_repo: Arc<dyn BatchRepository>,
        result_repo: Arc<dyn ResultRepository>,
        client: Arc<dyn EnrichmentClient>,
        dispatch_timeout: Duration,
    ) -> Self {
        Self {
            batch_service: Arc::new(BatchService::new(Arc::clone(&batch_repo))),
            dispatch_service: Arc::new(DispatchService::new(
                Arc::clone(&batch_repo),
                client,
                dispatch_timeout,
            )),
            dedup_service: Arc::new(DeduplicationService::new(Arc::clone(&result_repo))),
            batch_repo,
            result_repo,
        }
    }

    pub fn reconciler(&self, interval: Duration) -> ReconcilerWorker {
        ReconcilerWorker::new(
            Arc::clone(&self.batch_repo),
            Arc::clone(&self.result_repo),
            interval,
        )
    }
}
