pub mod client;
pub mod outcome;

pub use client::EnrichmentClient;
pub use outcome::DispatchOutcome;
