/// Periodic read-only refresh for display layers (Reconciler)
pub mod snapshot;
pub mod worker;

pub use snapshot::{DashboardSnapshot, StatusCounts};
pub use worker::{ReconcilerStatistics, ReconcilerWorker};
