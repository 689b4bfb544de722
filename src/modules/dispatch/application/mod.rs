pub mod service;

pub use service::DispatchService;
