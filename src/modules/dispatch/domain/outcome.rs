use serde::{Deserialize, Serialize};

use crate::modules::batches::domain::BatchId;

/// What a successful `dispatch` call did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DispatchOutcome {
    /// Payload acknowledged and the batch moved to `inprogress`
    Dispatched { batch_id: BatchId },
    /// Payload acknowledged, but a concurrent caller had already moved the
    /// batch on. The enrichment service tolerates the duplicate submission.
    AlreadyAdvanced { batch_id: BatchId },
}

impl DispatchOutcome {
    pub fn batch_id(&self) -> BatchId {
        match self {
            DispatchOutcome::Dispatched { batch_id }
            | DispatchOutcome::AlreadyAdvanced { batch_id } => *batch_id,
        }
    }
}
