//! Concrete clinic screens built from the generic state components.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each submodule fixes one screen's fields, rules, and wording:
//! - `login`: login and registration, the only writers of the session.
//! - `admin`: doctor and schedule management.
//! - `appointments`: booking and the upcoming-appointments list.
//! - `records`: medical record upload and listing.
//! - `dashboard`: the admin and patient two-tab dashboards.
//!
//! Rendering here is plain text; the binary prints it.

pub mod admin;
pub mod appointments;
pub mod dashboard;
pub mod login;
pub mod records;

/// Date portion of an ISO date or date-time string.
pub fn date_part(raw: &str) -> &str {
    raw.split_once('T').map_or(raw, |(date, _)| date)
}
