/// Batch registry (BatchStore)
///
/// Durable record of uploaded CSV batches and the sole authority over their
/// status transitions:
/// - Domain: entities, status value object and repository trait
/// - Infrastructure: Diesel-based repository over `csv_uploads`
/// - Application: validation and completion write-back
pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-exports for easy access
pub use application::BatchService;
pub use domain::{BatchId, BatchRepository, BatchStatus, BatchSummary};
pub use infrastructure::BatchRepositoryImpl;
