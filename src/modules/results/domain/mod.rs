pub mod entities;
pub mod repository;

pub use entities::{ProcessedLead, ResultId, ResultOrder};
pub use repository::ResultRepository;
