//! Role dashboards.
//!
//! Admins manage doctors and their schedules; patients see appointments and
//! their medical records. Every panel shares one transport and session.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use std::rc::Rc;

use super::admin::{DoctorForm, ScheduleForm};
use super::appointments::AppointmentForm;
use super::records::MedicalRecordForm;
use crate::net::api::Transport;
use crate::state::dashboard::{Dashboard, Panel};
use crate::state::form::{FormController, FormSchema};
use crate::state::list::{ListFetcher, Resource};
use crate::state::session::SessionReader;

/// Doctors | Schedules.
pub type AdminDashboard = Dashboard<DoctorForm, ScheduleForm>;

/// Appointments | Medical Records.
pub type PatientDashboard = Dashboard<AppointmentForm, MedicalRecordForm>;

pub fn panel<F>(schema: F, transport: &Rc<dyn Transport>, session: &SessionReader) -> Panel<F>
where
    F: FormSchema,
    F::Output: Resource,
{
    Panel::new(
        FormController::new(schema, Rc::clone(transport), session.clone()),
        ListFetcher::new(Rc::clone(transport), session.clone()),
    )
}

pub fn admin_dashboard(transport: &Rc<dyn Transport>, session: &SessionReader) -> AdminDashboard {
    Dashboard::new(panel(DoctorForm, transport, session), panel(ScheduleForm::new(), transport, session))
}

pub fn patient_dashboard(transport: &Rc<dyn Transport>, session: &SessionReader) -> PatientDashboard {
    Dashboard::new(
        panel(AppointmentForm::new(), transport, session),
        panel(MedicalRecordForm, transport, session),
    )
}
