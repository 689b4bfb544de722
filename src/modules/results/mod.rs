/// Processed leads written back by the enrichment service (ResultStore)
pub mod domain;
pub mod infrastructure;

pub use domain::{ProcessedLead, ResultId, ResultOrder, ResultRepository};
pub use infrastructure::ResultRepositoryImpl;
