use super::*;

#[test]
fn new_state_is_seeded() {
    let state = test_helpers::test_app_state();
    assert_eq!(state.chat.len(), 1);
    assert!(!state.chat.is_pending());
    assert_eq!(state.uploads.documents().len(), 3);
    assert_eq!(state.uploads.progress(), 0);
    assert!(!state.uploads.is_uploading());
}

#[test]
fn clones_share_simulators() {
    let a = test_helpers::test_app_state();
    let b = a.clone();
    assert!(b.uploads.delete("1"));
    assert_eq!(a.uploads.documents().len(), 2);
}
