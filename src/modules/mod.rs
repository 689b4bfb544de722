pub mod batches;
pub mod dedup;
pub mod dispatch;
pub mod reconciler;
pub mod results;
