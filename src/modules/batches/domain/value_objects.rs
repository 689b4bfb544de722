/// Value objects for the batches domain
use crate::shared::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a batch, as stored in `csv_uploads.status`
///
/// The column is free text. Values outside the known set are kept verbatim in
/// `Unknown` so that a row written by another party can still be listed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BatchStatus {
    NotStarted,
    InProgress,
    Complete,
    Unknown(String),
}

impl BatchStatus {
    pub fn as_str(&self) -> &str {
        match self {
            BatchStatus::NotStarted => "notstarted",
            BatchStatus::InProgress => "inprogress",
            BatchStatus::Complete => "complete",
            BatchStatus::Unknown(raw) => raw,
        }
    }

    /// Parse a stored value. Never fails.
    ///
    /// Only the exact canonical spellings are known. The status update filters
    /// on the canonical text, so a variant such as `NOTSTARTED` must not pass
    /// the dispatch precondition.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "notstarted" => BatchStatus::NotStarted,
            "inprogress" => BatchStatus::InProgress,
            "complete" => BatchStatus::Complete,
            _ => BatchStatus::Unknown(raw.to_string()),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, BatchStatus::Unknown(_))
    }

    /// The status a batch may move to next, if any
    pub fn successor(&self) -> Option<BatchStatus> {
        match self {
            BatchStatus::NotStarted => Some(BatchStatus::InProgress),
            BatchStatus::InProgress => Some(BatchStatus::Complete),
            BatchStatus::Complete | BatchStatus::Unknown(_) => None,
        }
    }

    pub fn can_transition_to(&self, next: &BatchStatus) -> bool {
        self.successor().as_ref() == Some(next)
    }

    /// Colour hint for display layers
    pub fn display_color(&self) -> &'static str {
        match self {
            BatchStatus::InProgress => "blue",
            BatchStatus::Complete => "green",
            BatchStatus::NotStarted => "gray",
            BatchStatus::Unknown(_) => "orange",
        }
    }
}

/// Reject any transition that is not a single forward step along
/// `notstarted -> inprogress -> complete`.
pub fn validate_transition(expected: &BatchStatus, next: &BatchStatus) -> AppResult<()> {
    if expected.can_transition_to(next) {
        Ok(())
    } else {
        Err(AppError::InvalidTransition {
            from: expected.to_string(),
            to: next.to_string(),
        })
    }
}

impl std::fmt::Display for BatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for BatchStatus {
    fn from(raw: String) -> Self {
        BatchStatus::parse(&raw)
    }
}

impl From<BatchStatus> for String {
    fn from(status: BatchStatus) -> Self {
        status.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_status_display() {
        assert_eq!(BatchStatus::NotStarted.to_string(), "notstarted");
        assert_eq!(BatchStatus::InProgress.to_string(), "inprogress");
        assert_eq!(BatchStatus::Complete.to_string(), "complete");
        assert_eq!(BatchStatus::Unknown("paused".into()).to_string(), "paused");
    }

    #[test]
    fn test_batch_status_parse_tolerates_unknown() {
        assert_eq!(BatchStatus::parse("notstarted"), BatchStatus::NotStarted);
        assert_eq!(BatchStatus::parse("inprogress"), BatchStatus::InProgress);
        assert_eq!(
            BatchStatus::parse("errored"),
            BatchStatus::Unknown("errored".to_string())
        );
        assert!(!BatchStatus::parse("errored").is_known());
    }

    #[test]
    fn test_batch_status_parse_is_exact() {
        for raw in ["NOTSTARTED", "notstarted ", " InProgress", "Complete"] {
            assert_eq!(BatchStatus::parse(raw), BatchStatus::Unknown(raw.to_string()));
            assert_eq!(BatchStatus::parse(raw).as_str(), raw);
        }
    }

    #[test]
    fn test_only_single_forward_steps_allowed() {
        use BatchStatus::*;

        assert!(validate_transition(&NotStarted, &InProgress).is_ok());
        assert!(validate_transition(&InProgress, &Complete).is_ok());

        for (from, to) in [
            (NotStarted, Complete),
            (InProgress, NotStarted),
            (Complete, InProgress),
            (Complete, NotStarted),
            (NotStarted, NotStarted),
            (NotStarted, Unknown("paused".into())),
            (Unknown("paused".into()), Complete),
        ] {
            assert!(
                matches!(
                    validate_transition(&from, &to),
                    Err(AppError::InvalidTransition { .. })
                ),
                "{} -> {} must be rejected",
                from,
                to
            );
        }
    }

    #[test]
    fn test_display_colors() {
        assert_eq!(BatchStatus::NotStarted.display_color(), "gray");
        assert_eq!(BatchStatus::InProgress.display_color(), "blue");
        assert_eq!(BatchStatus::Complete.display_color(), "green");
        assert_eq!(BatchStatus::Unknown("x".into()).display_color(), "orange");
    }

    #[test]
    fn test_serde_uses_stored_text() {
        let json = serde_json::to_string(&BatchStatus::InProgress).unwrap();
        assert_eq!(json, "\"inprogress\"");

        let parsed: BatchStatus = serde_json::from_str("\"complete\"").unwrap();
        assert_eq!(parsed, BatchStatus::Complete);
    }
}
