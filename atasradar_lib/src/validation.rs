use chrono::NaiveDate;

use crate::error::AtasRadarError;

pub const MAX_PROMPT_LENGTH: usize = 4000;
/// Largest page the open-data API serves.
pub const MAX_PAGE_SIZE: i64 = 500;

/// Strip ASCII control characters (0x00-0x1F except space 0x20), trim whitespace,
/// and enforce a byte-length limit.
pub fn sanitize_text(input: &str, max_len: usize) -> Result<String, AtasRadarError> {
    if input.len() > max_len {
        return Err(AtasRadarError::InvalidInput(format!(
            "input exceeds maximum length of {} bytes",
            max_len
        )));
    }
    let sanitized: String = input
        .chars()
        .filter(|c| !c.is_ascii_control() || *c == ' ' || *c == '\n')
        .collect::<String>()
        .trim()
        .to_string();
    if sanitized.is_empty() {
        return Err(AtasRadarError::InvalidInput(
            "input is empty after sanitization".to_string(),
        ));
    }
    Ok(sanitized)
}

/// Validate an instruction sent to the AI service. Blank prompts are refused
/// before any request is made.
pub fn validate_prompt(input: &str) -> Result<String, AtasRadarError> {
    if input.trim().is_empty() {
        return Err(AtasRadarError::InvalidInput(
            "prompt must not be empty".to_string(),
        ));
    }
    sanitize_text(input, MAX_PROMPT_LENGTH)
}

pub fn validate_page(page: i64) -> Result<i64, AtasRadarError> {
    if page < 1 {
        return Err(AtasRadarError::InvalidInput(
            "page must be >= 1".to_string(),
        ));
    }
    Ok(page)
}

pub fn validate_page_size(page_size: i64) -> Result<i64, AtasRadarError> {
    if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
        return Err(AtasRadarError::InvalidInput(format!(
            "page_size must be between 1 and {}",
            MAX_PAGE_SIZE
        )));
    }
    Ok(page_size)
}

pub fn validate_date(input: &str) -> Result<NaiveDate, AtasRadarError> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| {
        AtasRadarError::InvalidInput(format!(
            "invalid date '{}'. Expected format: YYYY-MM-DD (e.g., 2024-06-01)",
            trimmed
        ))
    })
}

pub fn validate_date_range(from: NaiveDate, to: NaiveDate) -> Result<(), AtasRadarError> {
    if from > to {
        return Err(AtasRadarError::InvalidInput(format!(
            "start date {} is after end date {}",
            from, to
        )));
    }
    Ok(())
}

/// Validate a UASG (managing unit) code: up to six digits.
pub fn validate_uasg(input: &str) -> Result<String, AtasRadarError> {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed.len() > 6 || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(AtasRadarError::InvalidInput(format!(
            "invalid UASG code '{}'. Expected up to 6 digits (e.g., 250005)",
            trimmed
        )));
    }
    Ok(trimmed.to_string())
}

/// Validate a CATMAT/CATSER catalog code.
pub fn validate_catalog_code(input: &str) -> Result<i64, AtasRadarError> {
    let trimmed = input.trim();
    match trimmed.parse::<i64>() {
        Ok(code) if code > 0 => Ok(code),
        _ => Err(AtasRadarError::InvalidInput(format!(
            "invalid CATMAT/CATSER code '{}'. Expected a positive number",
            trimmed
        ))),
    }
}
