//! Login and registration.
//!
//! Both forms post credentials to unauthenticated endpoints and, on success,
//! persist the returned token and user through the [`SessionStore`]. Server
//! messages (e.g. "Invalid credentials") are shown verbatim.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use std::rc::Rc;

use crate::error::{ClientError, MessagePolicy};
use crate::net::api::{Endpoint, Transport};
use crate::net::types::AuthResponse;
use crate::state::form::{DraftRecord, FormController, FormSchema, is_blank, text};
use crate::state::session::{Session, SessionStore};
use crate::util::field::{FieldKind, FieldSpec};

const AUTH_FAILED: &str = "An error occurred. Please try again.";
const CREDENTIALS_REQUIRED: &str = "Email and password are required";
const REGISTRATION_INCOMPLETE: &str = "All fields are required for registration";
const PASSWORD_MISMATCH: &str = "Passwords do not match";

pub const LOGIN_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("email", "Email", FieldKind::Email),
    FieldSpec::required("password", "Password", FieldKind::Password),
];

pub const REGISTER_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("firstName", "First Name", FieldKind::Text),
    FieldSpec::required("lastName", "Last Name", FieldKind::Text),
    FieldSpec::required("email", "Email", FieldKind::Email),
    FieldSpec::required("mobile", "Mobile", FieldKind::Tel),
    FieldSpec::required("password", "Password", FieldKind::Password),
    FieldSpec::required("confirmPassword", "Confirm Password", FieldKind::Password).client_only(),
];

fn credential_violations(draft: &DraftRecord) -> Vec<String> {
    if is_blank(draft, "email") || is_blank(draft, "password") {
        vec![CREDENTIALS_REQUIRED.to_owned()]
    } else {
        Vec::new()
    }
}

pub struct LoginForm;

impl FormSchema for LoginForm {
    type Output = AuthResponse;

    fn endpoint(&self) -> Endpoint {
        Endpoint::Login
    }

    fn fields(&self) -> &[FieldSpec] {
        LOGIN_FIELDS
    }

    fn failure_message(&self) -> &str {
        AUTH_FAILED
    }

    fn message_policy(&self) -> MessagePolicy {
        MessagePolicy::ServerVerbatim
    }

    fn validate(&self, draft: &DraftRecord) -> Vec<String> {
        credential_violations(draft)
    }
}

pub struct RegisterForm;

impl FormSchema for RegisterForm {
    type Output = AuthResponse;

    fn endpoint(&self) -> Endpoint {
        Endpoint::Register
    }

    fn fields(&self) -> &[FieldSpec] {
        REGISTER_FIELDS
    }

    fn failure_message(&self) -> &str {
        AUTH_FAILED
    }

    fn message_policy(&self) -> MessagePolicy {
        MessagePolicy::ServerVerbatim
    }

    fn validate(&self, draft: &DraftRecord) -> Vec<String> {
        let mut violations = credential_violations(draft);
        if ["firstName", "lastName", "mobile"].iter().any(|name| is_blank(draft, name)) {
            violations.push(REGISTRATION_INCOMPLETE.to_owned());
        }
        if text(draft, "password") != text(draft, "confirmPassword") {
            violations.push(PASSWORD_MISMATCH.to_owned());
        }
        violations
    }
}

/// A credentials form whose success establishes the session.
pub struct AuthFlow<S: FormSchema<Output = AuthResponse>> {
    form: FormController<S>,
    store: Rc<SessionStore>,
}

impl<S: FormSchema<Output = AuthResponse>> AuthFlow<S> {
    pub fn new(schema: S, transport: Rc<dyn Transport>, store: Rc<SessionStore>) -> Self {
        let form = FormController::new(schema, transport, store.reader());
        Self { form, store }
    }

    pub fn form(&self) -> &FormController<S> {
        &self.form
    }

    /// Submit the credentials and persist the resulting session.
    ///
    /// # Errors
    ///
    /// Returns the submission error (the form's error message is set), or
    /// [`ClientError::Storage`] when the session cannot be written; the
    /// entered credentials are then kept on the form.
    pub async fn submit(&self) -> Result<Session, ClientError> {
        let draft = self.form.draft();
        let session = Session::from(self.form.submit().await?);
        if let Err(err) = self.store.save(&session) {
            tracing::warn!(error = %err, "session not persisted");
            self.form.restore(draft, &err);
            return Err(err);
        }
        Ok(session)
    }
}
