pub mod entities;
pub mod repository;
pub mod value_objects;

pub use entities::{BatchId, BatchSummary, PayloadEnvelope};
pub use repository::BatchRepository;
pub use value_objects::{validate_transition, BatchStatus};
