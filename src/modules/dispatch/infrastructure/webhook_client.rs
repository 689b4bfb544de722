use crate::modules::batches::domain::BatchId;
use crate::modules::dispatch::domain::EnrichmentClient;
use crate::shared::errors::{AppError, AppResult};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{info, warn};

/// Header carrying the batch id alongside the CSV body
pub const BATCH_ID_HEADER: &str = "x-id";
const CSV_CONTENT_TYPE: &str = "text/csv";
const USER_AGENT: &str = "Leads-Ledger/1.0";
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Posts batch payloads to the enrichment workflow's webhook
pub struct WebhookEnrichmentClient {
    client: Client,
    webhook_url: String,
}

impl WebhookEnrichmentClient {
    pub fn new(webhook_url: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| {
                AppError::ConfigurationError(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            webhook_url: webhook_url.into(),
        })
    }

    pub fn webhook_url(&self) -> &str {
        &self.webhook_url
    }
}

#[async_trait]
impl EnrichmentClient for WebhookEnrichmentClient {
    async fn submit(&self, batch_id: BatchId, payload: &str) -> AppResult<()> {
        let response = self
            .client
            .post(&self.webhook_url)
            .header(CONTENT_TYPE, CSV_CONTENT_TYPE)
            .header(BATCH_ID_HEADER, batch_id.to_string())
            .body(payload.as_bytes().to_vec())
            .send()
            .await
            .map_err(|e| {
                warn!(batch_id, error = %e, "enrichment webhook unreachable");
                AppError::from(e)
            })?;

        let status = response.status();
        if status == StatusCode::OK {
            info!(batch_id, "enrichment webhook accepted batch");
            return Ok(());
        }

        let body: String = response
            .text()
            .await
            .unwrap_or_default()
            .chars()
            .take(MAX_ERROR_BODY_CHARS)
            .collect();
        warn!(batch_id, status = status.as_u16(), "enrichment webhook rejected batch");

        Err(AppError::NonSuccessResponse {
            code: status.as_u16(),
            body,
        })
    }
}
