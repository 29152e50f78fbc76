use super::*;
use crate::net::types::Id;
use crate::state::storage::MemoryStorage;
use serde_json::json;

fn doctor_session(token: &str) -> Session {
    let user: User = serde_json::from_value(json!({ "id": 1, "userType": "doctor", "firstName": "Meredith" })).unwrap();
    Session { token: token.into(), user, user_type: UserType::Doctor }
}

#[test]
fn read_without_save_is_absent() {
    let store = SessionStore::new(Rc::new(MemoryStorage::default()));
    assert_eq!(store.read(), None);
    assert_eq!(store.reader().token(), None);
}

#[test]
fn save_writes_all_keys_in_one_operation() {
    let storage = Rc::new(MemoryStorage::default());
    let store = SessionStore::new(storage.clone());

    store.save(&doctor_session("t1")).unwrap();

    assert_eq!(storage.write_count(), 1);
    assert_eq!(storage.get(TOKEN_KEY).unwrap().as_deref(), Some("t1"));
    assert_eq!(storage.get(USER_TYPE_KEY).unwrap().as_deref(), Some("doctor"));
    let user: serde_json::Value = serde_json::from_str(&storage.get(USER_KEY).unwrap().unwrap()).unwrap();
    assert_eq!(user["firstName"], json!("Meredith"));
}

#[test]
fn save_overwrites_previous_session() {
    let store = SessionStore::new(Rc::new(MemoryStorage::default()));
    store.save(&doctor_session("old")).unwrap();
    store.save(&doctor_session("new")).unwrap();
    assert_eq!(store.read().unwrap().token, "new");
}

#[test]
fn reader_sees_writes_made_after_it_was_created() {
    let store = SessionStore::new(Rc::new(MemoryStorage::default()));
    let reader = store.reader();
    assert_eq!(reader.token(), None);

    store.save(&doctor_session("t2")).unwrap();
    let session = reader.read().unwrap();
    assert_eq!(session.token, "t2");
    assert_eq!(session.user.id, Id::Number(1));
}

#[test]
fn clear_removes_all_three_keys() {
    let storage = Rc::new(MemoryStorage::default());
    let store = SessionStore::new(storage.clone());
    store.save(&doctor_session("t1")).unwrap();

    store.clear().unwrap();

    assert_eq!(store.read(), None);
    assert_eq!(storage.get(TOKEN_KEY).unwrap(), None);
    assert_eq!(storage.get(USER_KEY).unwrap(), None);
    assert_eq!(storage.get(USER_TYPE_KEY).unwrap(), None);
}

#[test]
fn partial_session_reads_as_absent() {
    let storage = Rc::new(MemoryStorage::default());
    storage.set_all(&[(TOKEN_KEY, "t1".into())]).unwrap();
    let store = SessionStore::new(storage);
    assert_eq!(store.read(), None);
}

#[test]
fn unknown_user_type_reads_as_absent() {
    let storage = Rc::new(MemoryStorage::default());
    storage
        .set_all(&[
            (TOKEN_KEY, "t1".into()),
            (USER_KEY, r#"{"id":1,"userType":"doctor"}"#.into()),
            (USER_TYPE_KEY, "janitor".into()),
        ])
        .unwrap();
    assert_eq!(SessionStore::new(storage).read(), None);
}

#[test]
fn session_from_auth_response_takes_user_type_from_user() {
    let response: AuthResponse =
        serde_json::from_value(json!({ "token": "t9", "user": { "id": 5, "userType": "patient" } })).unwrap();
    let session = Session::from(response);
    assert_eq!(session.token, "t9");
    assert_eq!(session.user_type, UserType::Patient);
}
