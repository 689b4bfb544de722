//! Boundary operations offered to the UI/CLI layer
//!
//! Authentication, rendering and refresh scheduling belong to the caller.
pub mod batch_commands;
pub mod result_commands;
pub mod state;

pub use batch_commands::{
    complete_batch, dispatch_batch, get_batch_status, get_batch_status_by_filename,
    list_batches, register_batch, BatchFilenameRequest, BatchIdRequest, BatchStatusResponse,
    RegisterBatchRequest,
};
pub use result_commands::{
    count_results, deduplicate_results, list_results, DeduplicateResultsRequest,
    DeduplicateResultsResponse, ListResultsRequest,
};
pub use state::AppState;
