use super::*;
use crate::net::api::{Method, RequestBody};
use crate::net::stub::StubTransport;
use crate::net::types::{Id, UserType};
use crate::state::storage::{FileStorage, MemoryStorage};
use serde_json::json;

fn store() -> Rc<SessionStore> {
    Rc::new(SessionStore::new(Rc::new(MemoryStorage::default())))
}

fn fill_register(form: &FormController<RegisterForm>, confirm: &str) {
    form.set_field("firstName", "Grace");
    form.set_field("lastName", "Hopper");
    form.set_field("email", "grace@example.com");
    form.set_field("mobile", "555-0100");
    form.set_field("password", "cobol");
    form.set_field("confirmPassword", confirm);
}

// =============================================================================
// Login
// =============================================================================

#[tokio::test]
async fn login_persists_session() {
    let stub = Rc::new(StubTransport::new());
    stub.respond(200, json!({ "token": "t1", "user": { "id": 1, "userType": "doctor" } }));
    let store = store();
    let flow = AuthFlow::new(LoginForm, stub.clone(), Rc::clone(&store));
    flow.form().set_field("email", "a@b.com");
    flow.form().set_field("password", "x");

    let session = flow.submit().await.unwrap();

    assert_eq!(session.token, "t1");
    assert_eq!(session.user_type, UserType::Doctor);
    let stored = store.read().unwrap();
    assert_eq!(stored.token, "t1");
    assert_eq!(stored.user_type, UserType::Doctor);
    assert_eq!(stored.user.id, Id::Number(1));

    let request = &stub.requests()[0];
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.endpoint, Endpoint::Login);
    assert_eq!(request.bearer, None);
    assert_eq!(request.body, RequestBody::Json(json!({ "email": "a@b.com", "password": "x" })));
}

#[tokio::test]
async fn unsaved_session_keeps_credentials_on_form() {
    let blocker = std::env::temp_dir().join(format!("clinic-login-{}", uuid::Uuid::new_v4()));
    std::fs::write(&blocker, "not a directory").unwrap();
    let store = Rc::new(SessionStore::new(Rc::new(FileStorage::new(blocker.join("session.json")))));
    let stub = Rc::new(StubTransport::new());
    stub.respond(200, json!({ "token": "t1", "user": { "id": 1, "userType": "doctor" } }));
    let flow = AuthFlow::new(LoginForm, stub.clone(), store);
    flow.form().set_field("email", "a@b.com");
    flow.form().set_field("password", "x");

    let err = flow.submit().await.unwrap_err();

    assert!(matches!(err, ClientError::Storage(_)));
    assert_eq!(flow.form().error().as_deref(), Some("An error occurred. Please try again."));
    assert_eq!(flow.form().field("email").and_then(|v| v.as_text().map(str::to_owned)).as_deref(), Some("a@b.com"));
    assert_eq!(flow.form().field("password").and_then(|v| v.as_text().map(str::to_owned)).as_deref(), Some("x"));

    std::fs::remove_file(&blocker).unwrap();
}

#[tokio::test]
async fn login_requires_email_and_password() {
    let stub = Rc::new(StubTransport::new());
    let flow = AuthFlow::new(LoginForm, stub.clone(), store());
    flow.form().set_field("email", "a@b.com");

    assert!(matches!(flow.submit().await, Err(ClientError::Validation(_))));

    assert_eq!(stub.request_count(), 0);
    assert_eq!(flow.form().error().as_deref(), Some("Email and password are required"));
}

#[tokio::test]
async fn rejected_login_shows_server_message_and_keeps_no_session() {
    let stub = Rc::new(StubTransport::new());
    stub.respond(400, json!({ "message": "Invalid email or password" }));
    let store = store();
    let flow = AuthFlow::new(LoginForm, stub.clone(), Rc::clone(&store));
    flow.form().set_field("email", "a@b.com");
    flow.form().set_field("password", "wrong");

    assert!(flow.submit().await.is_err());

    assert_eq!(flow.form().error().as_deref(), Some("Invalid email or password"));
    assert_eq!(store.read(), None);
    assert_eq!(flow.form().field("password"), Some("wrong".into()));
}

#[tokio::test]
async fn login_failure_without_message_uses_fallback() {
    let stub = Rc::new(StubTransport::new());
    stub.fail_network("refused");
    let flow = AuthFlow::new(LoginForm, stub.clone(), store());
    flow.form().set_field("email", "a@b.com");
    flow.form().set_field("password", "x");

    assert!(flow.submit().await.is_err());

    assert_eq!(flow.form().error().as_deref(), Some("An error occurred. Please try again."));
}

// =============================================================================
// Register
// =============================================================================

#[tokio::test]
async fn register_with_mismatched_confirmation_sends_nothing() {
    let stub = Rc::new(StubTransport::new());
    let flow = AuthFlow::new(RegisterForm, stub.clone(), store());
    fill_register(flow.form(), "fortran");

    assert!(flow.submit().await.is_err());

    assert_eq!(stub.request_count(), 0);
    assert_eq!(flow.form().error().as_deref(), Some("Passwords do not match"));
}

#[test]
fn register_reports_every_broken_rule() {
    let mut draft = RegisterForm.blank();
    draft.insert("password".into(), "a".into());
    assert_eq!(
        RegisterForm.validate(&draft),
        vec![
            "Email and password are required".to_owned(),
            "All fields are required for registration".to_owned(),
            "Passwords do not match".to_owned(),
        ]
    );
}

#[tokio::test]
async fn register_posts_profile_without_confirmation() {
    let stub = Rc::new(StubTransport::new());
    stub.respond(201, json!({ "token": "t9", "user": { "id": "u-9", "firstName": "Grace", "userType": "patient" } }));
    let store = store();
    let flow = AuthFlow::new(RegisterForm, stub.clone(), Rc::clone(&store));
    fill_register(flow.form(), "cobol");

    let session = flow.submit().await.unwrap();

    assert_eq!(session.user_type, UserType::Patient);
    assert_eq!(store.read().map(|s| s.token).as_deref(), Some("t9"));
    let RequestBody::Json(body) = &stub.requests()[0].body else {
        panic!("expected JSON body");
    };
    assert_eq!(body["firstName"], json!("Grace"));
    assert!(body.get("confirmPassword").is_none());
    assert_eq!(flow.form().draft(), RegisterForm.blank());
}
