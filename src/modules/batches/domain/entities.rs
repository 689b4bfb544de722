/// Domain entities for uploaded lead batches
///
/// A batch is one uploaded CSV file. It is registered once, dispatched to the
/// enrichment service at most once per successful precondition check, and
/// completed by the enrichment service's write-back.
use super::value_objects::BatchStatus;
use crate::shared::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Surrogate key of `csv_uploads`
pub type BatchId = i64;

/// A batch as listed: everything but the payload, which is read separately
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub id: BatchId,
    pub filename: String,
    pub status: BatchStatus,
}

/// Storage envelope for the raw CSV text: `{"csv_content": "..."}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayloadEnvelope {
    pub csv_content: String,
}

impl PayloadEnvelope {
    pub fn wrap(payload: &str) -> AppResult<serde_json::Value> {
        Ok(serde_json::to_value(PayloadEnvelope {
            csv_content: payload.to_string(),
        })?)
    }

    /// Recover the raw text from a stored value.
    ///
    /// Older rows hold the envelope as a JSON string rather than an object;
    /// both forms are accepted.
    pub fn unwrap_stored(stored: serde_json::Value) -> AppResult<String> {
        let envelope: PayloadEnvelope = match stored {
            serde_json::Value::String(text) => serde_json::from_str(&text),
            other => serde_json::from_value(other),
        }
        .map_err(|e| {
            AppError::SerializationError(format!("Failed to parse stored CSV data: {}", e))
        })?;

        Ok(envelope.csv_content)
    }
}
