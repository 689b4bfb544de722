pub mod service;

pub use service::DeduplicationService;
