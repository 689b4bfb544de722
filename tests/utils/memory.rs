/// In-memory stores with the same atomicity contracts as the PostgreSQL ones
///
/// Each operation runs under one mutex, which plays the role of the database's
/// uniqueness constraint, conditional update and delete transaction.
use async_trait::async_trait;
use chrono::Utc;
use leads_ledger::modules::batches::domain::validate_transition;
use leads_ledger::modules::batches::{BatchId, BatchRepository, BatchStatus, BatchSummary};
use leads_ledger::modules::dispatch::EnrichmentClient;
use leads_ledger::modules::results::{ProcessedLead, ResultId, ResultOrder, ResultRepository};
use leads_ledger::{AppError, AppResult};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::Barrier;

struct StoredBatch {
    filename: String,
    payload: String,
    status: BatchStatus,
}

#[derive(Default)]
struct BatchTable {
    next_id: BatchId,
    rows: BTreeMap<BatchId, StoredBatch>,
}

#[derive(Default)]
pub struct InMemoryBatchRepository {
    table: Mutex<BatchTable>,
}

impl InMemoryBatchRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite a status directly, as another writer of the table could
    pub fn force_status(&self, id: BatchId, status: BatchStatus) {
        let mut table = self.table.lock().unwrap();
        if let Some(row) = table.rows.get_mut(&id) {
            row.status = status;
        }
    }

    fn summary(id: BatchId, row: &StoredBatch) -> BatchSummary {
        BatchSummary {
            id,
            filename: row.filename.clone(),
            status: row.status.clone(),
        }
    }
}

#[async_trait]
impl BatchRepository for InMemoryBatchRepository {
    async fn register(&self, filename: &str, payload: &str) -> AppResult<BatchId> {
        let mut table = self.table.lock().unwrap();
        if table.rows.values().any(|row| row.filename == filename) {
            return Err(AppError::DuplicateFilename(filename.to_string()));
        }

        table.next_id += 1;
        let id = table.next_id;
        table.rows.insert(
            id,
            StoredBatch {
                filename: filename.to_string(),
                payload: payload.to_string(),
                status: BatchStatus::NotStarted,
            },
        );
        Ok(id)
    }

    async fn list(&self) -> AppResult<Vec<BatchSummary>> {
        let table = self.table.lock().unwrap();
        let mut batches: Vec<BatchSummary> = table
            .rows
            .iter()
            .map(|(id, row)| Self::summary(*id, row))
            .collect();
        batches.sort_by(|a, b| a.filename.cmp(&b.filename).then(a.id.cmp(&b.id)));
        Ok(batches)
    }

    async fn find_by_id(&self, id: BatchId) -> AppResult<Option<BatchSummary>> {
        let table = self.table.lock().unwrap();
        Ok(table.rows.get(&id).map(|row| Self::summary(id, row)))
    }

    async fn find_by_filename(&self, filename: &str) -> AppResult<Option<BatchSummary>> {
        let table = self.table.lock().unwrap();
        Ok(table
            .rows
            .iter()
            .find(|(_, row)| row.filename == filename)
            .map(|(id, row)| Self::summary(*id, row)))
    }

    async fn get_payload(&self, id: BatchId) -> AppResult<String> {
        let table = self.table.lock().unwrap();
        table
            .rows
            .get(&id)
            .map(|row| row.payload.clone())
            .ok_or_else(|| AppError::NotFound(format!("Batch {} not found", id)))
    }

    async fn transition(
        &self,
        id: BatchId,
        expected: &BatchStatus,
        next: &BatchStatus,
    ) -> AppResult<()> {
        validate_transition(expected, next)?;

        let mut table = self.table.lock().unwrap();
        let row = table
            .rows
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Batch {} not found", id)))?;

        if &row.status != expected {
            return Err(AppError::StatusMismatch {
                expected: expected.to_string(),
                actual: row.status.to_string(),
            });
        }
        row.status = next.clone();
        Ok(())
    }
}

#[derive(Default)]
struct ResultTable {
    next_id: ResultId,
    rows: Vec<ProcessedLead>,
}

#[derive(Default)]
pub struct InMemoryResultRepository {
    table: Mutex<ResultTable>,
}

impl InMemoryResultRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a lead the way the enrichment service would
    pub fn insert(&self, username: &str) -> ResultId {
        let mut table = self.table.lock().unwrap();
        table.next_id += 1;
        let id = table.next_id;
        table.rows.push(ProcessedLead {
            id,
            username: username.to_string(),
            qualified: Some(true),
            reason: None,
            profile_link: Some(format!("https://example.com/{}", username)),
            bio: None,
            category: None,
            email: None,
            full_name: None,
            received_at: Utc::now(),
        });
        id
    }

    /// (id, username) pairs in id order
    pub fn keys(&self) -> Vec<(ResultId, String)> {
        let table = self.table.lock().unwrap();
        let mut keys: Vec<(ResultId, String)> = table
            .rows
            .iter()
            .map(|lead| (lead.id, lead.username.clone()))
            .collect();
        keys.sort();
        keys
    }
}

#[async_trait]
impl ResultRepository for InMemoryResultRepository {
    async fn count(&self) -> AppResult<i64> {
        Ok(self.table.lock().unwrap().rows.len() as i64)
    }

    async fn list(&self, order: ResultOrder) -> AppResult<Vec<ProcessedLead>> {
        let mut rows = self.table.lock().unwrap().rows.clone();
        match order {
            ResultOrder::IdAscending => rows.sort_by_key(|lead| lead.id),
            ResultOrder::IdDescending => rows.sort_by_key(|lead| std::cmp::Reverse(lead.id)),
        }
        Ok(rows)
    }

    async fn delete_superseded(&self) -> AppResult<usize> {
        let mut table = self.table.lock().unwrap();

        let mut earliest: HashMap<String, ResultId> = HashMap::new();
        for lead in &table.rows {
            earliest
                .entry(lead.identity_key().to_string())
                .and_modify(|id| *id = (*id).min(lead.id))
                .or_insert(lead.id);
        }

        let before = table.rows.len();
        table
            .rows
            .retain(|lead| earliest.get(lead.identity_key()) == Some(&lead.id));
        Ok(before - table.rows.len())
    }
}

/// Enrichment client double that records every submission
pub struct RecordingClient {
    calls: AtomicUsize,
    submissions: Mutex<Vec<(BatchId, String)>>,
    response: fn() -> AppResult<()>,
    barrier: Option<Barrier>,
}

impl RecordingClient {
    pub fn accepting() -> Self {
        Self::responding(|| Ok(()))
    }

    pub fn responding(response: fn() -> AppResult<()>) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            submissions: Mutex::new(Vec::new()),
            response,
            barrier: None,
        }
    }

    /// Hold every submission until `parties` submissions are in flight
    pub fn rendezvous(parties: usize) -> Self {
        Self {
            barrier: Some(Barrier::new(parties)),
            ..Self::accepting()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn submissions(&self) -> Vec<(BatchId, String)> {
        self.submissions.lock().unwrap().clone()
    }
}

#[async_trait]
impl EnrichmentClient for RecordingClient {
    async fn submit(&self, batch_id: BatchId, payload: &str) -> AppResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.submissions
            .lock()
            .unwrap()
            .push((batch_id, payload.to_string()));

        if let Some(barrier) = &self.barrier {
            barrier.wait().await;
        }
        (self.response)()
    }
}
