//! Appointment booking and the upcoming-appointments list.

#[cfg(test)]
#[path = "appointments_test.rs"]
mod appointments_test;

use time::Date;

use super::date_part;
use crate::error::MessagePolicy;
use crate::net::api::Endpoint;
use crate::net::types::{Appointment, Id};
use crate::state::form::{DraftRecord, FormSchema, required_violations, text};
use crate::state::list::Resource;
use crate::util::field::{FieldKind, FieldSpec, SelectOption};
use crate::util::validate::{today_utc, upcoming_date_violation};

pub const APPOINTMENT_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("doctorId", "Select Doctor", FieldKind::Select),
    FieldSpec::required("date", "Date", FieldKind::Date),
    FieldSpec::required("time", "Time", FieldKind::Select),
    FieldSpec::required("reason", "Reason for Visit", FieldKind::TextArea),
];

pub const TIME_SLOTS: [&str; 6] = [
    "9:00 AM - 9:30 AM",
    "10:00 AM - 10:30 AM",
    "11:00 AM - 11:30 AM",
    "2:00 PM - 2:30 PM",
    "3:00 PM - 3:30 PM",
    "4:00 PM - 4:30 PM",
];

/// Entries shown before "show all" is requested.
pub const PREVIEW_LIMIT: usize = 3;

pub const NO_APPOINTMENTS: &str = "No appointments found";

impl Resource for Appointment {
    const ENDPOINT: Endpoint = Endpoint::Appointments;
    const LOAD_FAILED: &'static str = "Failed to load appointments";

    fn id(&self) -> &Id {
        &self.id
    }
}

pub struct AppointmentForm {
    today: Date,
}

impl AppointmentForm {
    pub fn new() -> Self {
        Self::with_today(today_utc())
    }

    pub fn with_today(today: Date) -> Self {
        Self { today }
    }
}

impl Default for AppointmentForm {
    fn default() -> Self {
        Self::new()
    }
}

impl FormSchema for AppointmentForm {
    type Output = Appointment;

    fn endpoint(&self) -> Endpoint {
        Endpoint::Appointments
    }

    fn fields(&self) -> &[FieldSpec] {
        APPOINTMENT_FIELDS
    }

    fn failure_message(&self) -> &str {
        "Failed to book appointment"
    }

    fn message_policy(&self) -> MessagePolicy {
        MessagePolicy::ServerVerbatim
    }

    fn validate(&self, draft: &DraftRecord) -> Vec<String> {
        let mut violations = required_violations(APPOINTMENT_FIELDS, draft);
        violations.extend(upcoming_date_violation("Date", text(draft, "date"), self.today));
        let time = text(draft, "time");
        if !time.trim().is_empty() && !TIME_SLOTS.contains(&time) {
            violations.push("Time must be one of the available slots".to_owned());
        }
        violations
    }
}

pub fn time_slot_options() -> Vec<SelectOption> {
    TIME_SLOTS.iter().map(|slot| SelectOption::same(slot)).collect()
}

/// The preview (first [`PREVIEW_LIMIT`]) or the whole list.
pub fn visible(items: &[Appointment], show_all: bool) -> &[Appointment] {
    if show_all { items } else { &items[..items.len().min(PREVIEW_LIMIT)] }
}

pub fn booking_confirmation(appointment: &Appointment) -> String {
    format!("Appointment booked successfully! Your appointment ID is: {}", appointment.id)
}

pub fn render_appointment(appointment: &Appointment) -> String {
    format!(
        "{}  {}  {}  {}  [{}]",
        date_part(&appointment.date),
        appointment.time,
        appointment.doctor_name(),
        appointment.reason,
        appointment.status.as_str()
    )
}
