/// Payload validation shared by the API routes
use crate::error::{Result, ServerError};
use chrono::{Datelike, Utc};

const MIN_YEAR: i32 = 1900;

/// Reject blank strings
pub fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ServerError::BadRequest(format!("\"{}\" is not allowed to be empty", field)));
    }
    Ok(())
}

/// Years run from 1900 to the current year
pub fn require_year(year: i32) -> Result<()> {
    let current = Utc::now().year();
    if !(MIN_YEAR..=current).contains(&year) {
        return Err(ServerError::BadRequest(format!(
            "\"year\" must be between {} and {}",
            MIN_YEAR, current
        )));
    }
    Ok(())
}
