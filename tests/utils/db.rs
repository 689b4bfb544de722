/// Database test utilities with singleton pattern
///
/// Provides thread-safe access to the test database with proper isolation.
/// Tests using these helpers are skipped when TEST_DATABASE_URL is not set.
use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager};
use diesel::sql_types::{Nullable, Text};
use diesel_migrations::MigrationHarness;
use leads_ledger::shared::infrastructure::database::{DbPool, MIGRATIONS};
use std::sync::{Mutex, MutexGuard, OnceLock};

static DB_POOL: OnceLock<Option<DbPool>> = OnceLock::new();

/// Get or create the singleton pool for tests, with migrations applied.
///
/// Returns `None` (and the caller should return early) when no test database
/// is configured.
pub fn get_test_db_pool() -> Option<DbPool> {
    DB_POOL
        .get_or_init(|| {
            dotenvy::dotenv().ok();
            let test_db_url = match std::env::var("TEST_DATABASE_URL") {
                Ok(url) => url,
                Err(_) => {
                    eprintln!("TEST_DATABASE_URL not set; skipping PostgreSQL tests");
                    return None;
                }
            };

            let manager = ConnectionManager::<PgConnection>::new(test_db_url);
            let pool = r2d2::Pool::builder()
                .max_size(10)
                .build(manager)
                .expect("Failed to create test database pool");

            let mut conn = pool.get().expect("Failed to get DB connection");
            conn.run_pending_migrations(MIGRATIONS)
                .expect("Unable to migrate the test database");

            Some(pool)
        })
        .clone()
}

/// Clean all test tables - use at the start of each test
pub fn clean_test_db(pool: &DbPool) {
    let mut conn = pool.get().expect("Failed to get DB connection");

    diesel::sql_query("TRUNCATE TABLE csv_uploads RESTART IDENTITY CASCADE")
        .execute(&mut conn)
        .expect("Failed to clean csv_uploads");

    diesel::sql_query("TRUNCATE TABLE processed_leads RESTART IDENTITY CASCADE")
        .execute(&mut conn)
        .expect("Failed to clean processed_leads");
}

/// Insert a processed lead the way the enrichment service does
pub fn insert_processed_lead(pool: &DbPool, username: &str, email: Option<&str>) {
    let mut conn = pool.get().expect("Failed to get DB connection");

    diesel::sql_query(
        "INSERT INTO processed_leads (qualified, username, email) VALUES (TRUE, $1, $2)",
    )
    .bind::<Text, _>(username)
    .bind::<Nullable<Text>, _>(email)
    .execute(&mut conn)
    .expect("Failed to insert processed lead");
}

/// Overwrite a batch status, as an out-of-band writer could
pub fn force_batch_status(pool: &DbPool, id: i64, status: &str) {
    let mut conn = pool.get().expect("Failed to get DB connection");

    diesel::sql_query("UPDATE csv_uploads SET status = $2 WHERE id = $1")
        .bind::<diesel::sql_types::BigInt, _>(id)
        .bind::<Text, _>(status)
        .execute(&mut conn)
        .expect("Failed to force batch status");
}

/// Global test mutex for serialization
static TEST_LOCK: Mutex<()> = Mutex::new(());

/// Acquire test lock to ensure tests run serially
/// Returns a guard that releases the lock when dropped
pub fn acquire_test_lock() -> MutexGuard<'static, ()> {
    // Handle poisoned mutex by recovering from panic
    match TEST_LOCK.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
