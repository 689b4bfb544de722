/// Diesel-based implementation of BatchRepository
///
/// Registration leans on the UNIQUE constraint on `filename`; status changes are
/// a single `UPDATE ... WHERE id = $1 AND status = $2`.
use crate::modules::batches::domain::entities::{BatchId, BatchSummary, PayloadEnvelope};
use crate::modules::batches::domain::repository::BatchRepository;
use crate::modules::batches::domain::value_objects::{validate_transition, BatchStatus};
use crate::modules::batches::infrastructure::models::{CsvUploadSummaryModel, NewCsvUpload};
use crate::schema::csv_uploads;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::infrastructure::database::{DbConnection, DbPool};
use crate::shared::utils::{LogContext, TimedOperation};
use crate::{log_debug, log_info};
use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use std::time::Instant;

pub struct BatchRepositoryImpl {
    pool: DbPool,
}

impl BatchRepositoryImpl {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get database connection from pool
    fn get_conn(&self) -> AppResult<DbConnection> {
        self.pool
            .get()
            .map_err(|e| AppError::DatabaseError(format!("Failed to get connection: {}", e)))
    }

    fn load_summary(conn: &mut PgConnection, id: BatchId) -> AppResult<Option<BatchSummary>> {
        let row: Option<CsvUploadSummaryModel> = csv_uploads::table
            .find(id)
            .select(CsvUploadSummaryModel::as_select())
            .first(conn)
            .optional()
            .map_err(|e| AppError::DatabaseError(format!("Failed to get batch by id: {}", e)))?;

        Ok(row.map(CsvUploadSummaryModel::to_summary))
    }
}

#[async_trait]
impl BatchRepository for BatchRepositoryImpl {
    async fn register(&self, filename: &str, payload: &str) -> AppResult<BatchId> {
        let new_upload = NewCsvUpload {
            filename,
            csv_data: PayloadEnvelope::wrap(payload)?,
            status: BatchStatus::NotStarted.as_str(),
        };

        let mut conn = self.get_conn()?;
        let timer = TimedOperation::new("register batch");

        let id: BatchId = diesel::insert_into(csv_uploads::table)
            .values(&new_upload)
            .returning(csv_uploads::id)
            .get_result(&mut conn)
            .map_err(|e| match e {
                DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                    AppError::DuplicateFilename(filename.to_string())
                }
                other => AppError::DatabaseError(format!("Failed to register batch: {}", other)),
            })?;

        timer.finish();
        log_info!("Registered batch {} as '{}'", id, filename);
        Ok(id)
    }

    async fn list(&self) -> AppResult<Vec<BatchSummary>> {
        let mut conn = self.get_conn()?;
        let start = Instant::now();

        let rows: Vec<CsvUploadSummaryModel> = csv_uploads::table
            .select(CsvUploadSummaryModel::as_select())
            .order((csv_uploads::filename.asc(), csv_uploads::id.asc()))
            .load(&mut conn)
            .map_err(|e| AppError::DatabaseError(format!("Failed to list batches: {}", e)))?;

        LogContext::db_operation("list", "csv_uploads", Some(start.elapsed().as_millis() as u64));
        Ok(rows.into_iter().map(CsvUploadSummaryModel::to_summary).collect())
    }

    async fn find_by_id(&self, id: BatchId) -> AppResult<Option<BatchSummary>> {
        let mut conn = self.get_conn()?;
        Self::load_summary(&mut conn, id)
    }

    async fn find_by_filename(&self, filename: &str) -> AppResult<Option<BatchSummary>> {
        let mut conn = self.get_conn()?;

        let row: Option<CsvUploadSummaryModel> = csv_uploads::table
            .filter(csv_uploads::filename.eq(filename))
            .select(CsvUploadSummaryModel::as_select())
            .first(&mut conn)
            .optional()
            .map_err(|e| {
                AppError::DatabaseError(format!("Failed to get batch by filename: {}", e))
            })?;

        Ok(row.map(CsvUploadSummaryModel::to_summary))
    }

    async fn get_payload(&self, id: BatchId) -> AppResult<String> {
        let mut conn = self.get_conn()?;

        let stored: Option<serde_json::Value> = csv_uploads::table
            .find(id)
            .select(csv_uploads::csv_data)
            .first(&mut conn)
            .optional()
            .map_err(|e| AppError::DatabaseError(format!("Failed to get batch payload: {}", e)))?;

        match stored {
            Some(value) => PayloadEnvelope::unwrap_stored(value),
            None => Err(AppError::NotFound(format!("Batch {} not found", id))),
        }
    }

    async fn transition(
        &self,
        id: BatchId,
        expected: &BatchStatus,
        next: &BatchStatus,
    ) -> AppResult<()> {
        validate_transition(expected, next)?;

        let mut conn = self.get_conn()?;

        // Compare-and-swap: only the caller that still sees `expected` wins
        let updated = diesel::update(
            csv_uploads::table
                .filter(csv_uploads::id.eq(id))
                .filter(csv_uploads::status.eq(expected.as_str())),
        )
        .set((
            csv_uploads::status.eq(next.as_str()),
            csv_uploads::updated_at.eq(Utc::now()),
        ))
        .execute(&mut conn)
        .map_err(|e| AppError::DatabaseError(format!("Failed to update batch status: {}", e)))?;

        if updated == 1 {
            log_debug!("Batch {} moved from {} to {}", id, expected, next);
            return Ok(());
        }

        match Self::load_summary(&mut conn, id)? {
            None => Err(AppError::NotFound(format!("Batch {} not found", id))),
            Some(current) => Err(AppError::StatusMismatch {
                expected: expected.to_string(),
                actual: current.status.to_string(),
            }),
        }
    }
}
