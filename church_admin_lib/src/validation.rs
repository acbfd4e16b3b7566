//! Input checks for values that end up in list queries.

use chrono::NaiveDate;
use church_admin_api::types::Cursor;

use crate::error::AdminError;

pub const MAX_SEARCH_LENGTH: usize = 100;
pub const MAX_PAGE_SIZE: u64 = 100;

/// Workflow statuses used across finance records, churches and accounts.
pub const VALID_STATUSES: &[&str] = &[
    "pending",
    "approved",
    "rejected",
    "completed",
    "cancelled",
    "active",
    "inactive",
];

/// Strip ASCII control characters (0x00-0x1F except space 0x20), trim whitespace,
/// and enforce a byte-length limit.
pub fn sanitize_text(input: &str, max_len: usize) -> Result<String, AdminError> {
    if input.len() > max_len {
        return Err(AdminError::InvalidInput(format!(
            "input exceeds maximum length of {} bytes",
            max_len
        )));
    }
    let sanitized: String = input
        .chars()
        .filter(|c| !c.is_ascii_control() || *c == ' ')
        .collect::<String>()
        .trim()
        .to_string();
    if sanitized.is_empty() {
        return Err(AdminError::InvalidInput(
            "input is empty after sanitization".to_string(),
        ));
    }
    Ok(sanitized)
}

/// Validate a search/name string: enforce length, strip control chars, trim.
pub fn validate_search(input: &str) -> Result<String, AdminError> {
    sanitize_text(input, MAX_SEARCH_LENGTH)
}

/// Validate a status filter, case-insensitive. Returns the lowercase form.
pub fn validate_status(input: &str) -> Result<String, AdminError> {
    let lower = input.trim().to_lowercase();
    if VALID_STATUSES.contains(&lower.as_str()) {
        Ok(lower)
    } else {
        Err(AdminError::InvalidInput(format!(
            "unknown status '{}'. Valid values: {}",
            input,
            VALID_STATUSES.join(", ")
        )))
    }
}

/// Validate a date filter in `YYYY-MM-DD` form.
pub fn validate_date(input: &str) -> Result<NaiveDate, AdminError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        AdminError::InvalidInput(format!("invalid date '{}', expected YYYY-MM-DD", input))
    })
}

/// Validate an inclusive date range; either end may be open.
pub fn validate_date_range(
    start: Option<&str>,
    end: Option<&str>,
) -> Result<(Option<NaiveDate>, Option<NaiveDate>), AdminError> {
    let start = start.map(validate_date).transpose()?;
    let end = end.map(validate_date).transpose()?;
    if let (Some(s), Some(e)) = (start, end) {
        if s > e {
            return Err(AdminError::InvalidInput(format!(
                "start date {} is after end date {}",
                s, e
            )));
        }
    }
    Ok((start, end))
}

/// Validate page size (must be 1..=100).
pub fn validate_page_size(page_size: u64) -> Result<u64, AdminError> {
    if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
        return Err(AdminError::InvalidInput(format!(
            "page size must be between 1 and {}",
            MAX_PAGE_SIZE
        )));
    }
    Ok(page_size)
}

/// Validate a cursor pasted back from an earlier listing.
pub fn validate_cursor(input: &str) -> Result<Cursor, AdminError> {
    Ok(Cursor::restore(input)?)
}
