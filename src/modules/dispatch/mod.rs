/// Dispatch of batches to the enrichment service (DispatchController)
///
/// Architecture:
/// - Domain: the `EnrichmentClient` port and dispatch outcomes
/// - Infrastructure: reqwest webhook client
/// - Application: precondition check, submission and status advance
pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::DispatchService;
pub use domain::{DispatchOutcome, EnrichmentClient};
pub use infrastructure::WebhookEnrichmentClient;
