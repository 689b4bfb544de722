/// Diesel models for the csv_uploads table
use crate::modules::batches::domain::entities::BatchSummary;
use crate::modules::batches::domain::value_objects::BatchStatus;
use crate::schema::csv_uploads;
use diesel::prelude::*;
use serde_json::Value as JsonValue;

/// Diesel model for inserting new batches
#[derive(Insertable, Debug)]
#[diesel(table_name = csv_uploads)]
pub struct NewCsvUpload<'a> {
    pub filename: &'a str,
    pub csv_data: JsonValue,
    pub status: &'a str,
}

/// Diesel model for listing batches (payload column excluded)
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = csv_uploads)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CsvUploadSummaryModel {
    pub id: i64,
    pub filename: String,
    pub status: String,
}

impl CsvUploadSummaryModel {
    /// Convert to domain BatchSummary
    pub fn to_summary(self) -> BatchSummary {
        BatchSummary {
            id: self.id,
            filename: self.filename,
            status: BatchStatus::parse(&self.status),
        }
    }
}
