/// Collapses duplicate processed leads (Deduplicator)
pub mod application;

pub use application::DeduplicationService;
