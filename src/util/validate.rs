//! Date and time checks shared by the scheduling forms.
//!
//! Values arrive in the browser input formats: `YYYY-MM-DD` for dates and
//! 24-hour `HH:MM` for times.

#[cfg(test)]
#[path = "validate_test.rs"]
mod validate_test;

use time::macros::format_description;
use time::{Date, OffsetDateTime, Time};

pub fn today_utc() -> Date {
    OffsetDateTime::now_utc().date()
}

/// `None` for anything but `YYYY-MM-DD`; callers report that as a violation.
pub fn parse_date(raw: &str) -> Option<Date> {
    match Date::parse(raw.trim(), format_description!("[year]-[month]-[day]")) {
        Ok(date) => Some(date),
        Err(error) => {
            tracing::debug!(%error, raw, "rejected date input");
            None
        }
    }
}

pub fn parse_clock_time(raw: &str) -> Option<Time> {
    match Time::parse(raw.trim(), format_description!("[hour]:[minute]")) {
        Ok(time) => Some(time),
        Err(error) => {
            tracing::debug!(%error, raw, "rejected time input");
            None
        }
    }
}

/// Violation for a non-empty date that is malformed or before `today`.
pub fn upcoming_date_violation(label: &str, raw: &str, today: Date) -> Option<String> {
    if raw.trim().is_empty() {
        return None;
    }
    match parse_date(raw) {
        None => Some(format!("{label} must be a valid date (YYYY-MM-DD)")),
        Some(date) if date < today => Some(format!("{label} cannot be in the past")),
        Some(_) => None,
    }
}

/// Violation for a non-empty time that is not `HH:MM`.
pub fn clock_time_violation(label: &str, raw: &str) -> Option<String> {
    if raw.trim().is_empty() || parse_clock_time(raw).is_some() {
        return None;
    }
    Some(format!("{label} must be a valid time (HH:MM)"))
}

/// Violation for a non-empty count that is not an integer of at least `min`.
pub fn min_count_violation(label: &str, raw: &str, min: u32) -> Option<String> {
    if raw.trim().is_empty() {
        return None;
    }
    match raw.trim().parse::<u32>() {
        Ok(count) if count >= min => None,
        _ => Some(format!("{label} must be at least {min}")),
    }
}
