use super::*;
use crate::net::types::{AppointmentStatus, DoctorRef};
use time::macros::date;

fn appointment(id: i64) -> Appointment {
    Appointment {
        id: Id::Number(id),
        doctor_id: Some(Id::Number(2)),
        date: "2030-03-04T00:00:00.000Z".into(),
        time: TIME_SLOTS[1].into(),
        reason: "Checkup".into(),
        status: AppointmentStatus::Confirmed,
        doctor: Some(DoctorRef { name: Some("Dr. Quinn".into()), specialization: None }),
    }
}

fn booking(date: &str, time: &str) -> DraftRecord {
    let mut draft = AppointmentForm::new().blank();
    draft.insert("doctorId".into(), "2".into());
    draft.insert("date".into(), date.into());
    draft.insert("time".into(), time.into());
    draft.insert("reason".into(), "Headache".into());
    draft
}

#[test]
fn booking_accepts_listed_slot() {
    let form = AppointmentForm::with_today(date!(2030 - 03 - 01));
    assert!(form.validate(&booking("2030-03-01", "2:00 PM - 2:30 PM")).is_empty());
}

#[test]
fn booking_rejects_unlisted_slot_and_past_date() {
    let form = AppointmentForm::with_today(date!(2030 - 03 - 01));
    assert_eq!(
        form.validate(&booking("2030-02-28", "1:00 PM - 1:30 PM")),
        vec!["Date cannot be in the past".to_owned(), "Time must be one of the available slots".to_owned()]
    );
}

#[test]
fn booking_surfaces_server_message() {
    assert_eq!(AppointmentForm::new().message_policy(), MessagePolicy::ServerVerbatim);
    assert_eq!(AppointmentForm::new().failure_message(), "Failed to book appointment");
}

#[test]
fn slot_options_cover_every_slot() {
    let options = time_slot_options();
    assert_eq!(options.len(), TIME_SLOTS.len());
    assert_eq!(options[0], SelectOption::same("9:00 AM - 9:30 AM"));
}

#[test]
fn preview_shows_first_three_unless_all() {
    let items: Vec<Appointment> = (1..=5).map(appointment).collect();
    assert_eq!(visible(&items, false).len(), PREVIEW_LIMIT);
    assert_eq!(visible(&items, false)[2].id, Id::Number(3));
    assert_eq!(visible(&items, true).len(), 5);
    assert_eq!(visible(&items[..2], false).len(), 2);
    assert!(visible(&[], false).is_empty());
}

#[test]
fn confirmation_names_appointment_id() {
    assert_eq!(
        booking_confirmation(&appointment(42)),
        "Appointment booked successfully! Your appointment ID is: 42"
    );
}

#[test]
fn row_shows_doctor_or_placeholder() {
    let mut item = appointment(1);
    assert_eq!(render_appointment(&item), "2030-03-04  10:00 AM - 10:30 AM  Dr. Quinn  Checkup  [confirmed]");
    item.doctor = None;
    item.status = AppointmentStatus::Pending;
    assert!(render_appointment(&item).contains("Not assigned"));
    assert!(render_appointment(&item).ends_with("[pending]"));
}
