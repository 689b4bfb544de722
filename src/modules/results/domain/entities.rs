/// A lead as written back by the enrichment service
///
/// `username` is the identity key: two rows with the same username describe
/// the same lead and are collapsed by deduplication, keeping the lowest id.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type ResultId = i64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedLead {
    pub id: ResultId,
    pub username: String,
    pub qualified: Option<bool>,
    pub reason: Option<String>,
    pub profile_link: Option<String>,
    pub bio: Option<String>,
    pub category: Option<String>,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub received_at: DateTime<Utc>,
}

impl ProcessedLead {
    pub fn identity_key(&self) -> &str {
        &self.username
    }
}

/// Ordering for result listings; ids grow with insertion order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultOrder {
    IdAscending,
    /// Newest first
    #[default]
    IdDescending,
}
