pub mod webhook_client;

pub use webhook_client::WebhookEnrichmentClient;
