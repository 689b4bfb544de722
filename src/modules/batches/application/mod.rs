pub mod service;

pub use service::BatchService;
