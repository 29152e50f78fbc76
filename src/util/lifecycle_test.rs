use super::*;

#[test]
fn starts_mounted() {
    assert!(Lifecycle::default().is_mounted());
}

#[test]
fn unmount_is_seen_by_clones() {
    let lifecycle = Lifecycle::default();
    let held_by_request = lifecycle.clone();
    lifecycle.unmount();
    assert!(!held_by_request.is_mounted());
}
