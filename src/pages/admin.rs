//! Admin screens: doctor registration and doctor schedules.
//!
//! DESIGN
//! ======
//! Both forms always show their generic failure message; the server's reason
//! is only logged. Schedule dates are checked against the current UTC date,
//! injectable through [`ScheduleForm::with_today`] for tests.

#[cfg(test)]
#[path = "admin_test.rs"]
mod admin_test;

use time::Date;

use super::date_part;
use crate::net::api::Endpoint;
use crate::net::types::{Doctor, Id, Schedule};
use crate::state::form::{DraftRecord, FormSchema, blank_draft, required_violations, text};
use crate::state::list::Resource;
use crate::util::field::{FieldKind, FieldSpec, FieldValue, SelectOption};
use crate::util::validate::{clock_time_violation, min_count_violation, today_utc, upcoming_date_violation};

pub const DOCTOR_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("name", "Name", FieldKind::Text),
    FieldSpec::required("specialization", "Specialization", FieldKind::Text),
    FieldSpec::required("email", "Email", FieldKind::Email),
    FieldSpec::required("mobile", "Mobile", FieldKind::Tel),
    FieldSpec::required("password", "Password", FieldKind::Password),
];

pub const SCHEDULE_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("doctorId", "Select Doctor", FieldKind::Select),
    FieldSpec::required("date", "Date", FieldKind::Date),
    FieldSpec::required("startTime", "Start Time", FieldKind::Time),
    FieldSpec::required("endTime", "End Time", FieldKind::Time),
    FieldSpec::required("maxAppointments", "Max Appointments", FieldKind::Number),
];

pub const DEFAULT_MAX_APPOINTMENTS: &str = "10";

impl Resource for Doctor {
    const ENDPOINT: Endpoint = Endpoint::Doctors;
    const LOAD_FAILED: &'static str = "Failed to load doctors. Please try again.";

    fn id(&self) -> &Id {
        &self.id
    }
}

impl Resource for Schedule {
    const ENDPOINT: Endpoint = Endpoint::DoctorSchedules;
    const LOAD_FAILED: &'static str = "Failed to load schedules. Please try again.";

    fn id(&self) -> &Id {
        &self.id
    }
}

pub struct DoctorForm;

impl FormSchema for DoctorForm {
    type Output = Doctor;

    fn endpoint(&self) -> Endpoint {
        Endpoint::Doctors
    }

    fn fields(&self) -> &[FieldSpec] {
        DOCTOR_FIELDS
    }

    fn failure_message(&self) -> &str {
        "Failed to add doctor. Please try again."
    }
}

pub struct ScheduleForm {
    today: Date,
}

impl ScheduleForm {
    pub fn new() -> Self {
        Self::with_today(today_utc())
    }

    pub fn with_today(today: Date) -> Self {
        Self { today }
    }
}

impl Default for ScheduleForm {
    fn default() -> Self {
        Self::new()
    }
}

impl FormSchema for ScheduleForm {
    type Output = Schedule;

    fn endpoint(&self) -> Endpoint {
        Endpoint::DoctorSchedules
    }

    fn fields(&self) -> &[FieldSpec] {
        SCHEDULE_FIELDS
    }

    fn failure_message(&self) -> &str {
        "Failed to add schedule. Please try again."
    }

    fn blank(&self) -> DraftRecord {
        let mut draft = blank_draft(SCHEDULE_FIELDS);
        draft.insert("maxAppointments".to_owned(), FieldValue::from(DEFAULT_MAX_APPOINTMENTS));
        draft
    }

    fn validate(&self, draft: &DraftRecord) -> Vec<String> {
        let mut violations = required_violations(SCHEDULE_FIELDS, draft);
        violations.extend(upcoming_date_violation("Date", text(draft, "date"), self.today));
        violations.extend(clock_time_violation("Start Time", text(draft, "startTime")));
        violations.extend(clock_time_violation("End Time", text(draft, "endTime")));
        violations.extend(min_count_violation("Max Appointments", text(draft, "maxAppointments"), 1));
        violations
    }
}

/// Doctor choices for the schedule form, labeled "name - specialization".
pub fn doctor_options(doctors: &[Doctor]) -> Vec<SelectOption> {
    doctors
        .iter()
        .map(|doctor| SelectOption {
            value: doctor.id.to_string(),
            label: format!("{} - {}", doctor.name, doctor.specialization),
        })
        .collect()
}

pub fn render_doctor(doctor: &Doctor) -> String {
    format!(
        "{}\n  Specialization: {}\n  Email: {}\n  Mobile: {}",
        doctor.name, doctor.specialization, doctor.email, doctor.mobile
    )
}

/// Schedule card; the doctor is looked up in `doctors` by id, which may
/// arrive as a number or a string.
pub fn render_schedule(schedule: &Schedule, doctors: &[Doctor]) -> String {
    let doctor = schedule
        .doctor_id
        .as_ref()
        .and_then(|id| doctors.iter().find(|doctor| doctor.id.to_string() == id.to_string()))
        .map(|doctor| doctor.name.as_str())
        .or_else(|| schedule.doctor.as_ref().and_then(|doctor| doctor.name.as_deref()))
        .unwrap_or("Unknown Doctor");
    let max = schedule.max_appointments.map_or_else(|| "-".to_owned(), |max| max.to_string());
    format!(
        "{doctor}\n  Date: {}\n  Time: {} - {}\n  Max Appointments: {max}",
        date_part(&schedule.date),
        schedule.start_time,
        schedule.end_time
    )
}
