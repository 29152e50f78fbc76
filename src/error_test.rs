use super::*;

// =============================================================================
// from_status
// =============================================================================

#[test]
fn from_status_maps_401_and_403_to_auth() {
    assert_eq!(ClientError::from_status(401, ""), ClientError::Auth { status: 401 });
    assert_eq!(ClientError::from_status(403, r#"{"message":"nope"}"#), ClientError::Auth { status: 403 });
}

#[test]
fn from_status_keeps_server_message() {
    let err = ClientError::from_status(409, r#"{"message":"Email already registered"}"#);
    assert_eq!(err, ClientError::Server { status: 409, message: Some("Email already registered".into()) });
}

#[test]
fn from_status_without_json_body_has_no_message() {
    let err = ClientError::from_status(500, "Internal Server Error");
    assert_eq!(err, ClientError::Server { status: 500, message: None });
}

// =============================================================================
// server_message
// =============================================================================

#[test]
fn server_message_ignores_blank_and_non_string_messages() {
    assert_eq!(server_message(r#"{"message":"   "}"#), None);
    assert_eq!(server_message(r#"{"message":42}"#), None);
    assert_eq!(server_message("[]"), None);
}

// =============================================================================
// display_message
// =============================================================================

#[test]
fn display_message_joins_violations() {
    let err = ClientError::Validation(vec!["Name is required".into(), "Email is required".into()]);
    assert_eq!(err.display_message("fallback", MessagePolicy::AlwaysFallback), "Name is required; Email is required");
}

#[test]
fn display_message_uses_server_message_only_when_verbatim() {
    let err = ClientError::Server { status: 400, message: Some("Slot taken".into()) };
    assert_eq!(err.display_message("Failed", MessagePolicy::ServerVerbatim), "Slot taken");
    assert_eq!(err.display_message("Failed", MessagePolicy::AlwaysFallback), "Failed");
}

#[test]
fn display_message_falls_back_for_auth_and_network() {
    let auth = ClientError::Auth { status: 401 };
    let network = ClientError::Network("connection refused".into());
    assert_eq!(auth.display_message("Try again", MessagePolicy::ServerVerbatim), "Try again");
    assert_eq!(network.display_message("Try again", MessagePolicy::ServerVerbatim), "Try again");
}
