//! Form controller: one draft record and its submission lifecycle.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each clinic form is a [`FormSchema`] (fields, blank shape, validation rules,
//! endpoint, failure wording). [`FormController`] drives any schema through
//! edit → validate → submit and exposes the draft, error, and busy state the
//! UI renders.
//!
//! ERROR HANDLING
//! ==============
//! Validation failures never reach the network. Request failures leave the
//! draft untouched and store a display message; success resets the draft to
//! the blank shape. The busy flag is a scoped guard, released exactly once on
//! every exit path.

#[cfg(test)]
#[path = "form_test.rs"]
mod form_test;

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::session::SessionReader;
use crate::error::{ClientError, MessagePolicy};
use crate::net::api::{self, ApiRequest, Endpoint, Part, RequestBody, Transport};
use crate::util::busy::BusyFlag;
use crate::util::field::{FieldKind, FieldSpec, FieldValue};
use crate::util::lifecycle::Lifecycle;

/// In-progress form data keyed by field name.
pub type DraftRecord = BTreeMap<String, FieldValue>;

/// Fixed description of one form: its fields, rules, and target endpoint.
pub trait FormSchema {
    /// Record returned by the server on success.
    type Output: DeserializeOwned + Clone + 'static;

    fn endpoint(&self) -> Endpoint;

    fn fields(&self) -> &[FieldSpec];

    /// Generic message shown when submission fails.
    fn failure_message(&self) -> &str;

    fn message_policy(&self) -> MessagePolicy {
        MessagePolicy::AlwaysFallback
    }

    /// Initial shape: every non-file field present and empty.
    fn blank(&self) -> DraftRecord {
        blank_draft(self.fields())
    }

    /// Human-readable violations; empty when the draft may be submitted.
    fn validate(&self, draft: &DraftRecord) -> Vec<String> {
        required_violations(self.fields(), draft)
    }

    fn body(&self, draft: &DraftRecord) -> RequestBody {
        encode_draft(self.fields(), draft)
    }
}

pub fn blank_draft(fields: &[FieldSpec]) -> DraftRecord {
    fields
        .iter()
        .filter(|field| field.kind != FieldKind::File)
        .map(|field| (field.name.to_owned(), FieldValue::Text(String::new())))
        .collect()
}

pub fn is_blank(draft: &DraftRecord, name: &str) -> bool {
    draft.get(name).is_none_or(FieldValue::is_blank)
}

pub fn text<'a>(draft: &'a DraftRecord, name: &str) -> &'a str {
    draft.get(name).and_then(FieldValue::as_text).unwrap_or("")
}

/// "`Label` is required" for every required field left blank.
pub fn required_violations(fields: &[FieldSpec], draft: &DraftRecord) -> Vec<String> {
    fields
        .iter()
        .filter(|field| field.required && is_blank(draft, field.name))
        .map(|field| format!("{} is required", field.label))
        .collect()
}

/// Encode submitted fields as JSON, or as multipart when a file is attached.
pub fn encode_draft(fields: &[FieldSpec], draft: &DraftRecord) -> RequestBody {
    let has_file = fields
        .iter()
        .any(|field| field.kind == FieldKind::File && matches!(draft.get(field.name), Some(FieldValue::File(_))));

    if has_file {
        let parts = fields
            .iter()
            .filter(|field| field.submitted)
            .filter_map(|field| match draft.get(field.name)? {
                FieldValue::Text(value) => Some(Part::Text { name: field.name.to_owned(), value: value.clone() }),
                FieldValue::File(file) => Some(Part::File { name: field.name.to_owned(), file: file.clone() }),
            })
            .collect();
        return RequestBody::Multipart(parts);
    }

    let object: Map<String, Value> = fields
        .iter()
        .filter(|field| field.submitted && field.kind != FieldKind::File)
        .map(|field| (field.name.to_owned(), json_value(field.kind, text(draft, field.name))))
        .collect();
    RequestBody::Json(Value::Object(object))
}

fn json_value(kind: FieldKind, raw: &str) -> Value {
    if kind == FieldKind::Number {
        if let Ok(n) = raw.trim().parse::<i64>() {
            return Value::from(n);
        }
    }
    Value::String(raw.to_owned())
}

type SuccessCallback<T> = Box<dyn Fn(&T)>;

#[derive(Debug)]
struct FormState {
    draft: DraftRecord,
    error: Option<String>,
}

struct FormInner<S: FormSchema> {
    schema: S,
    transport: Rc<dyn Transport>,
    session: SessionReader,
    state: RefCell<FormState>,
    busy: BusyFlag,
    lifecycle: Lifecycle,
    on_success: RefCell<Vec<SuccessCallback<S::Output>>>,
}

impl<S: FormSchema> FormInner<S> {
    /// Run callbacks without holding the list borrowed, so a callback may
    /// register further callbacks. Those run from the next success on.
    fn notify_success(&self, record: &S::Output) {
        let running = std::mem::take(&mut *self.on_success.borrow_mut());
        for callback in &running {
            callback(record);
        }
        let mut callbacks = self.on_success.borrow_mut();
        let added = std::mem::replace(&mut *callbacks, running);
        callbacks.extend(added);
    }
}

/// Shared handle to one form's draft and submission state.
pub struct FormController<S: FormSchema> {
    inner: Rc<FormInner<S>>,
}

impl<S: FormSchema> Clone for FormController<S> {
    fn clone(&self) -> Self {
        Self { inner: Rc::clone(&self.inner) }
    }
}

impl<S: FormSchema> FormController<S> {
    pub fn new(schema: S, transport: Rc<dyn Transport>, session: SessionReader) -> Self {
        let draft = schema.blank();
        Self {
            inner: Rc::new(FormInner {
                schema,
                transport,
                session,
                state: RefCell::new(FormState { draft, error: None }),
                busy: BusyFlag::default(),
                lifecycle: Lifecycle::default(),
                on_success: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn schema(&self) -> &S {
        &self.inner.schema
    }

    /// Update one draft field. No validation runs here.
    pub fn set_field(&self, name: &str, value: impl Into<FieldValue>) {
        self.inner.state.borrow_mut().draft.insert(name.to_owned(), value.into());
    }

    pub fn field(&self, name: &str) -> Option<FieldValue> {
        self.inner.state.borrow().draft.get(name).cloned()
    }

    pub fn draft(&self) -> DraftRecord {
        self.inner.state.borrow().draft.clone()
    }

    pub fn error(&self) -> Option<String> {
        self.inner.state.borrow().error.clone()
    }

    /// True while a submission is in flight; the UI disables resubmission.
    pub fn is_submitting(&self) -> bool {
        self.inner.busy.is_busy()
    }

    pub fn validate(&self) -> Vec<String> {
        self.inner.schema.validate(&self.inner.state.borrow().draft)
    }

    /// Put back a draft and show `err` after a follow-up to a successful
    /// submission failed.
    pub fn restore(&self, draft: DraftRecord, err: &ClientError) {
        let message = err.display_message(self.inner.schema.failure_message(), self.inner.schema.message_policy());
        let mut state = self.inner.state.borrow_mut();
        state.draft = draft;
        state.error = Some(message);
    }

    /// Register a callback run with each created record, in registration order.
    pub fn on_success(&self, callback: impl Fn(&S::Output) + 'static) {
        self.inner.on_success.borrow_mut().push(Box::new(callback));
    }

    /// Tear down: reset the draft and drop the result of any in-flight request.
    pub fn unmount(&self) {
        self.inner.lifecycle.unmount();
        self.inner.state.borrow_mut().draft = self.inner.schema.blank();
    }

    /// Validate and POST the draft.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Busy`] while another submission is in flight (no request).
    /// - [`ClientError::Validation`] when rules fail (no request).
    /// - [`ClientError::Unmounted`] when torn down before the response arrived.
    /// - Transport/status/decode errors from the request itself.
    pub async fn submit(&self) -> Result<S::Output, ClientError> {
        let inner = &self.inner;
        let endpoint = inner.schema.endpoint();
        if inner.busy.is_busy() {
            tracing::debug!(endpoint = endpoint.path(), "submit ignored while busy");
            return Err(ClientError::Busy);
        }

        let violations = self.validate();
        if !violations.is_empty() {
            let err = ClientError::Validation(violations);
            inner.state.borrow_mut().error = Some(err.display_message("", MessagePolicy::AlwaysFallback));
            return Err(err);
        }

        let Some(_busy) = inner.busy.try_acquire() else {
            return Err(ClientError::Busy);
        };
        let bearer = if endpoint.requires_auth() { inner.session.token() } else { None };
        let request = {
            let mut state = inner.state.borrow_mut();
            state.error = None;
            ApiRequest::post(endpoint, bearer, inner.schema.body(&state.draft))
        };

        tracing::info!(endpoint = endpoint.path(), "submitting form");
        let outcome = api::execute::<S::Output>(inner.transport.as_ref(), request).await;

        if !inner.lifecycle.is_mounted() {
            tracing::debug!(endpoint = endpoint.path(), "discarding submit result after unmount");
            return Err(ClientError::Unmounted);
        }

        match outcome {
            Ok(record) => {
                {
                    let mut state = inner.state.borrow_mut();
                    state.draft = inner.schema.blank();
                    state.error = None;
                }
                tracing::info!(endpoint = endpoint.path(), "form submitted");
                inner.notify_success(&record);
                Ok(record)
            }
            Err(err) => {
                tracing::warn!(endpoint = endpoint.path(), error = %err, "form submission failed");
                let message = err.display_message(inner.schema.failure_message(), inner.schema.message_policy());
                inner.state.borrow_mut().error = Some(message);
                Err(err)
            }
        }
    }
}
