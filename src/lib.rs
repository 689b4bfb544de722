pub mod commands;
pub mod modules;
pub mod schema;
pub mod shared;

pub use commands::AppState;
pub use shared::{AppConfig, AppError, AppResult, Database};

use shared::utils::init_logger;
use std::sync::Arc;

/// Connect to the store, apply migrations and wire the services.
///
/// Returns the state used by boundary commands and the database handle.
pub fn bootstrap(config: &AppConfig) -> AppResult<(AppState, Arc<Database>)> {
    init_logger();

    log::info!(
        "Initializing database connection to: {}",
        config.redacted_database_url()
    );
    let database = Arc::new(Database::new(&config.database)?);
    database.run_migrations()?;

    let state = AppState::from_database(&database, config)?;
    Ok((state, database))
}
