//! Client error taxonomy.
//!
//! ERROR HANDLING
//! ==============
//! Every failure is caught at the component boundary and converted to a
//! display string via [`ClientError::display_message`]. Nothing here is fatal;
//! the user recovers by resubmitting or reloading.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use serde_json::Value;

/// Errors produced by form submission, list loading, and session storage.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// Client-side validation failed; no request was sent.
    #[error("validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// The server rejected the credentials (401/403).
    #[error("not authorized: status {status}")]
    Auth { status: u16 },

    /// The request never completed.
    #[error("network request failed: {0}")]
    Network(String),

    /// The server returned a non-success status.
    #[error("server error: status {status}")]
    Server { status: u16, message: Option<String> },

    /// The request could not be built; nothing was sent.
    #[error("request could not be built: {0}")]
    InvalidRequest(String),

    /// The response body did not match the expected record shape.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// A submission from the same controller is already in flight.
    #[error("a submission is already in flight")]
    Busy,

    /// The owning component was torn down before the request completed.
    #[error("component unmounted before the request completed")]
    Unmounted,

    /// Durable session storage could not be read or written.
    #[error("session storage failed: {0}")]
    Storage(String),
}

/// How a component turns server failures into display text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessagePolicy {
    /// Show the server's `message` field verbatim when present.
    ServerVerbatim,
    /// Always show the component's generic fallback.
    AlwaysFallback,
}

impl ClientError {
    /// Classify a non-success HTTP response.
    pub fn from_status(status: u16, body: &str) -> Self {
        match status {
            401 | 403 => Self::Auth { status },
            _ => Self::Server { status, message: server_message(body) },
        }
    }

    /// Display string for inline rendering next to a form or list.
    pub fn display_message(&self, fallback: &str, policy: MessagePolicy) -> String {
        match (self, policy) {
            (Self::Validation(violations), _) => violations.join("; "),
            (Self::Server { message: Some(message), .. }, MessagePolicy::ServerVerbatim) => message.clone(),
            _ => fallback.to_owned(),
        }
    }
}

/// Extract a non-empty `message` string from a JSON error body.
pub fn server_message(body: &str) -> Option<String> {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return None;
    };
    value
        .get("message")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .map(ToOwned::to_owned)
}
