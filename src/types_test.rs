use super::*;

#[test]
fn user_message_has_no_error_flag() {
    let msg = Message::user("hello");
    assert_eq!(msg.role, Role::User);
    assert_eq!(msg.content, "hello");
    assert!(msg.is_error.is_none());
    assert!(!msg.is_error());
}

#[test]
fn assistant_error_sets_flag() {
    let msg = Message::assistant_error("nope");
    assert_eq!(msg.role, Role::Assistant);
    assert_eq!(msg.is_error, Some(true));
    assert!(msg.is_error());
}

#[test]
fn message_ids_are_unique() {
    let a = Message::user("a");
    let b = Message::user("a");
    assert_ne!(a.id, b.id);
}

#[test]
fn message_timestamp_is_recent() {
    let before = now_ms();
    let msg = Message::assistant("hi");
    assert!(msg.timestamp >= before);
    assert!(msg.timestamp > 0);
}

#[test]
fn message_json_uses_camel_case_and_omits_unset_flag() {
    let msg = Message::assistant("hi");
    let json = serde_json::to_value(&msg).unwrap();
    assert_eq!(json["role"], "assistant");
    assert!(json.get("isError").is_none());

    let err = Message::assistant_error("bad");
    let json = serde_json::to_value(&err).unwrap();
    assert_eq!(json["isError"], true);
}

#[test]
fn message_deserializes_without_error_flag() {
    let raw = r#"{"id":"1","content":"hi","role":"user","timestamp":5}"#;
    let msg: Message = serde_json::from_str(raw).unwrap();
    assert_eq!(msg.role, Role::User);
    assert_eq!(msg.timestamp, 5);
    assert!(msg.is_error.is_none());
}

#[test]
fn document_status_serializes_as_display_name() {
    assert_eq!(serde_json::to_value(DocumentStatus::Processing).unwrap(), "Processing");
    assert_eq!(serde_json::to_value(DocumentStatus::Processed).unwrap(), "Processed");
}

#[test]
fn document_new_assigns_fresh_ids() {
    let a = Document::new("a.pdf", "1.0 MB", "Just now", DocumentStatus::Processing);
    let b = Document::new("a.pdf", "1.0 MB", "Just now", DocumentStatus::Processing);
    assert_ne!(a.id, b.id);
    assert_eq!(a.status, DocumentStatus::Processing);
}

#[test]
fn recent_means_dated_in_days_or_just_now() {
    let dated = |date: &str| Document::new("a.pdf", "1.0 MB", date, DocumentStatus::Processed);
    assert!(dated("2 days ago").is_recent());
    assert!(dated("1 day ago").is_recent());
    assert!(dated("Just now").is_recent());
    assert!(!dated("1 week ago").is_recent());
    assert!(!dated("2 weeks ago").is_recent());
}
