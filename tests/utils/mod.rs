#![allow(dead_code)]

pub mod db;
pub mod memory;

use leads_ledger::modules::dispatch::EnrichmentClient;
use leads_ledger::AppState;
use memory::{InMemoryBatchRepository, InMemoryResultRepository};
use std::sync::Arc;
use std::time::Duration;

/// Services over in-memory stores, with handles kept for assertions
pub struct TestServices {
    pub state: AppState,
    pub batches: Arc<InMemoryBatchRepository>,
    pub results: Arc<InMemoryResultRepository>,
}

pub fn build_test_services(client: Arc<dyn EnrichmentClient>) -> TestServices {
    let batches = Arc::new(InMemoryBatchRepository::new());
    let results = Arc::new(InMemoryResultRepository::new());

    let state = AppState::from_parts(
        batches.clone(),
        results.clone(),
        client,
        Duration::from_secs(5),
    );

    TestServices {
        state,
        batches,
        results,
    }
}
