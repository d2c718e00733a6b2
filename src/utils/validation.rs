use chrono::{DateTime, Utc};
use validator::{Validate, ValidationError};

use crate::errors::AppError;

pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), AppError> {
    payload
        .validate()
        .map_err(|err| AppError::BadRequest(err.to_string()))
}

pub fn parse_rfc3339(value: &str) -> Result<DateTime<Utc>, AppError> {
    DateTime::parse_from_rfc3339(value)
        .map(|date| date.with_timezone(&Utc))
        .map_err(|err| AppError::BadRequest(format!("invalid date {:?}: {}", value, err)))
}

/// Empty strings pass; they mean "no date" for optional fields.
pub fn validate_rfc3339(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || DateTime::parse_from_rfc3339(value).is_ok() {
        return Ok(());
    }
    Err(ValidationError::new("date must be RFC 3339, e.g. 2023-01-01T00:00:00Z"))
}
