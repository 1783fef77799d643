//! Field validators for user input. Each returns `None` when the value is
//! acceptable, or a user-facing message. Validation failures block the
//! action before any service call; no partial submission occurs.

use chrono::NaiveDate;

/// Validate an email: must contain '@' and '.', max 254 chars.
pub fn validate_email(email: &str) -> Option<String> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Some("Email is required".to_string());
    }
    if trimmed.len() > 254 {
        return Some("Email must be at most 254 characters".to_string());
    }
    if !trimmed.contains('@') || !trimmed.contains('.') {
        return Some("Email must be a valid address (contain '@' and '.')".to_string());
    }
    None
}

pub fn validate_date_range(start: NaiveDate, end: NaiveDate) -> Option<String> {
    if end < start {
        return Some("End date must be on or after the start date".to_string());
    }
    None
}

/// Parse a vulnerability count: a non-negative whole number.
pub fn parse_vulnerabilities(raw: &str) -> Result<u32, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("Vulnerability count is required".to_string());
    }
    trimmed
        .parse::<u32>()
        .map_err(|_| "Vulnerability count must be a non-negative whole number".to_string())
}

/// Remarks: required, at most 1000 characters.
pub fn validate_remarks(remarks: &str) -> Option<String> {
    let trimmed = remarks.trim();
    if trimmed.is_empty() {
        return Some("Remarks are required".to_string());
    }
    if trimmed.chars().count() > 1000 {
        return Some("Remarks must be at most 1000 characters".to_string());
    }
    None
}
