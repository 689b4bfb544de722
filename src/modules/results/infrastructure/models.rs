/// Diesel models for the processed_leads table
use crate::modules::results::domain::entities::ProcessedLead;
use crate::schema::processed_leads;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = processed_leads)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProcessedLeadModel {
    pub id: i64,
    pub qualified: Option<bool>,
    pub reason: Option<String>,
    pub username: String,
    pub profile_link: Option<String>,
    pub bio: Option<String>,
    pub category: Option<String>,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub received_at: DateTime<Utc>,
}

impl From<ProcessedLeadModel> for ProcessedLead {
    fn from(model: ProcessedLeadModel) -> Self {
        ProcessedLead {
            id: model.id,
            username: model.username,
            qualified: model.qualified,
            reason: model.reason,
            profile_link: model.profile_link,
            bio: model.bio,
            category: model.category,
            email: model.email,
            full_name: model.full_name,
            received_at: model.received_at,
        }
    }
}
