/// Diesel-based implementation of ResultRepository
use crate::modules::results::domain::entities::{ProcessedLead, ResultOrder};
use crate::modules::results::domain::repository::ResultRepository;
use crate::modules::results::infrastructure::models::ProcessedLeadModel;
use crate::schema::processed_leads;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::infrastructure::database::{DbConnection, DbPool};
use crate::shared::utils::TimedOperation;
use async_trait::async_trait;
use diesel::prelude::*;

/// Removes every row that has an earlier row with the same username.
/// A row survives only if no smaller id shares its username.
const DELETE_SUPERSEDED_SQL: &str = r#"
    DELETE FROM processed_leads newer
    USING processed_leads older
    WHERE newer.username = older.username
      AND newer.id > older.id
"#;

pub struct ResultRepositoryImpl {
    pool: DbPool,
}

impl ResultRepositoryImpl {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get database connection from pool
    fn get_conn(&self) -> AppResult<DbConnection> {
        self.pool
            .get()
            .map_err(|e| AppError::DatabaseError(format!("Failed to get connection: {}", e)))
    }
}

#[async_trait]
impl ResultRepository for ResultRepositoryImpl {
    async fn count(&self) -> AppResult<i64> {
        let mut conn = self.get_conn()?;

        processed_leads::table
            .count()
            .get_result(&mut conn)
            .map_err(|e| AppError::DatabaseError(format!("Failed to count processed leads: {}", e)))
    }

    async fn list(&self, order: ResultOrder) -> AppResult<Vec<ProcessedLead>> {
        let mut conn = self.get_conn()?;

        let query = processed_leads::table.select(ProcessedLeadModel::as_select());
        let rows: Vec<ProcessedLeadModel> = match order {
            ResultOrder::IdAscending => query.order(processed_leads::id.asc()).load(&mut conn),
            ResultOrder::IdDescending => query.order(processed_leads::id.desc()).load(&mut conn),
        }
        .map_err(|e| AppError::DatabaseError(format!("Failed to list processed leads: {}", e)))?;

        Ok(rows.into_iter().map(ProcessedLead::from).collect())
    }

    async fn delete_superseded(&self) -> AppResult<usize> {
        let mut conn = self.get_conn()?;
        let timer = TimedOperation::new("delete superseded processed leads");

        let removed = conn
            .transaction::<usize, diesel::result::Error, _>(|conn| {
                diesel::sql_query(DELETE_SUPERSEDED_SQL).execute(conn)
            })
            .map_err(|e| {
                AppError::DatabaseError(format!("Failed to delete duplicate leads: {}", e))
            })?;

        timer.finish_with_info(&format!("{} rows removed", removed));
        Ok(removed)
    }
}
