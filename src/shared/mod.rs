// Shared Kernel
// Concerns used by every bounded context (batches, results, dispatch, dedup)

pub mod config;          // Environment-driven configuration
pub mod errors;          // Shared error types
pub mod infrastructure;  // Shared infrastructure (database pool, migrations)
pub mod utils;           // Shared utilities (logging, validation)

// Re-exports for convenience
pub use config::AppConfig;
pub use errors::{AppError, AppResult};
pub use infrastructure::database::Database;
