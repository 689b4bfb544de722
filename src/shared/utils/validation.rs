use regex::Regex;
use std::sync::OnceLock;

use crate::shared::errors::AppError;

const MAX_FILENAME_LEN: usize = 255;

fn filename_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // Plain file name (no path separators or control characters) ending in .csv
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^[^/\\\x00-\x1f]+\.csv$").expect("filename pattern is valid")
    })
}

pub struct Validator;

impl Validator {
    pub fn validate_filename(filename: &str) -> Result<(), AppError> {
        if filename.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Filename cannot be empty".to_string(),
            ));
        }
        if filename.len() > MAX_FILENAME_LEN {
            return Err(AppError::ValidationError(format!(
                "Filename too long (max {} characters)",
                MAX_FILENAME_LEN
            )));
        }
        if !filename_pattern().is_match(filename) {
            return Err(AppError::ValidationError(format!(
                "'{}' is not a plain .csv file name",
                filename
            )));
        }
        Ok(())
    }

    pub fn validate_payload(payload: &str) -> Result<(), AppError> {
        if payload.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Batch payload cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_csv_names() {
        assert!(Validator::validate_filename("leads.csv").is_ok());
        assert!(Validator::validate_filename("Leads March 2025.CSV").is_ok());
    }

    #[test]
    fn test_rejects_bad_names() {
        assert!(Validator::validate_filename("").is_err());
        assert!(Validator::validate_filename("   ").is_err());
        assert!(Validator::validate_filename("leads.xlsx").is_err());
        assert!(Validator::validate_filename("../etc/leads.csv").is_err());
        assert!(Validator::validate_filename(&format!("{}.csv", "a".repeat(300))).is_err());
    }

    #[test]
    fn test_rejects_blank_payload() {
        assert!(Validator::validate_payload("username,bio\n").is_ok());
        assert!(Validator::validate_payload(" \n\t").is_err());
    }
}
