use crate::{log_info, log_warn};
use crate::shared::config::DatabaseSettings;
use crate::shared::errors::AppError;
use crate::shared::utils::logger::LogContext;
use diesel::pg::PgConnection;
use diesel::r2d2::{self, ConnectionManager, CustomizeConnection, Pool};
use diesel::RunQueryDsl;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::time::Duration;

pub type DbPool = Pool<ConnectionManager<PgConnection>>;
pub type DbConnection = r2d2::PooledConnection<ConnectionManager<PgConnection>>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Bounds every statement issued on a pooled connection
#[derive(Debug, Clone, Copy)]
struct StatementTimeout(Duration);

impl CustomizeConnection<PgConnection, r2d2::Error> for StatementTimeout {
    fn on_acquire(&self, conn: &mut PgConnection) -> Result<(), r2d2::Error> {
        diesel::sql_query(format!("SET statement_timeout = {}", self.0.as_millis()))
            .execute(conn)
            .map(|_| ())
            .map_err(r2d2::Error::QueryError)
    }
}

#[derive(Debug)]
pub struct Database {
    pool: DbPool,
}

impl Database {
    pub fn new(settings: &DatabaseSettings) -> Result<Self, AppError> {
        let manager = ConnectionManager::<PgConnection>::new(settings.url.clone());

        let min_idle = std::cmp::max(1, settings.max_pool_size / 4);
        let pool = r2d2::Pool::builder()
            .max_size(settings.max_pool_size)
            .min_idle(Some(min_idle))
            // Time to wait for a connection from the pool
            .connection_timeout(settings.connection_timeout)
            .idle_timeout(Some(Duration::from_secs(300)))
            .max_lifetime(Some(Duration::from_secs(1800)))
            .test_on_check_out(true)
            .connection_customizer(Box::new(StatementTimeout(settings.statement_timeout)))
            .build(manager)
            .map_err(|e| {
                AppError::DatabaseError(format!("Failed to create connection pool: {}", e))
            })?;

        log_info!(
            "Database connection pool initialized with max_size: {}, min_idle: {}, statement_timeout: {}ms",
            pool.max_size(),
            min_idle,
            settings.statement_timeout.as_millis()
        );

        Ok(Self { pool })
    }

    pub fn get_connection(&self) -> Result<DbConnection, AppError> {
        let start = std::time::Instant::now();

        match self.pool.get() {
            Ok(conn) => {
                let duration = start.elapsed().as_millis() as u64;
                if duration > 100 {
                    log_warn!("Slow database connection acquire: {}ms", duration);
                }
                Ok(conn)
            }
            Err(e) => {
                LogContext::error_with_context(
                    &e,
                    "Failed to acquire database connection from pool",
                );
                Err(AppError::from(e))
            }
        }
    }

    /// Apply any migrations that have not been run yet
    pub fn run_migrations(&self) -> Result<usize, AppError> {
        let mut conn = self.get_connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| AppError::DatabaseError(format!("Failed to run migrations: {}", e)))?;

        log_info!("Applied {} pending migration(s)", applied.len());
        Ok(applied.len())
    }

    /// Get the underlying connection pool (useful for testing and repository initialization)
    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}
