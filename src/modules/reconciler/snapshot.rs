use crate::modules::batches::domain::{BatchStatus, BatchSummary};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub not_started: usize,
    pub in_progress: usize,
    pub complete: usize,
    pub unknown: usize,
}

impl StatusCounts {
    pub fn from_batches(batches: &[BatchSummary]) -> Self {
        batches
            .iter()
            .fold(StatusCounts::default(), |mut counts, batch| {
                match batch.status {
                    BatchStatus::NotStarted => counts.not_started += 1,
                    BatchStatus::InProgress => counts.in_progress += 1,
                    BatchStatus::Complete => counts.complete += 1,
                    BatchStatus::Unknown(_) => counts.unknown += 1,
                }
                counts
            })
    }

    pub fn total(&self) -> usize {
        self.not_started + self.in_progress + self.complete + self.unknown
    }
}

/// Read-only view of batch and result state at one point in time
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub batches: Vec<BatchSummary>,
    pub status_counts: StatusCounts,
    pub result_count: i64,
    pub refreshed_at: DateTime<Utc>,
}

impl DashboardSnapshot {
    pub fn new(batches: Vec<BatchSummary>, result_count: i64) -> Self {
        let status_counts = StatusCounts::from_batches(&batches);
        Self {
            batches,
            status_counts,
            result_count,
            refreshed_at: Utc::now(),
        }
    }

    /// Batches that may be dispatched right now
    pub fn dispatchable(&self) -> impl Iterator<Item = &BatchSummary> {
        self.batches
            .iter()
            .filter(|batch| batch.status == BatchStatus::NotStarted)
    }
}
