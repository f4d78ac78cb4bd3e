use super::*;
use crate::backend::canned::{CANNED_REPLIES, REPLY_DELAY};
use crate::state::test_helpers;
use std::time::Duration;

#[tokio::test]
async fn list_messages_starts_with_greeting() {
    let state = test_helpers::test_app_state();
    let Json(messages) = list_messages(State(state)).await;
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].content, crate::services::seed::GREETING);
}

#[tokio::test]
async fn blank_submit_is_not_accepted() {
    let state = test_helpers::test_app_state();
    let (status, Json(body)) =
        submit_message(State(state.clone()), Json(SubmitRequest { content: "  ".into() })).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body.accepted);
    assert_eq!(state.chat.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn submit_then_status_then_reply() {
    let state = test_helpers::test_app_state();
    let (status, Json(body)) = submit_message(
        State(state.clone()),
        Json(SubmitRequest { content: "How do I calibrate the sensor?".into() }),
    )
    .await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert!(body.accepted);

    let Json(pending) = chat_status(State(state.clone())).await;
    assert!(pending.pending);
    assert_eq!(pending.count, 2);

    let (status, Json(body)) =
        submit_message(State(state.clone()), Json(SubmitRequest { content: "manual?".into() })).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body.accepted);

    tokio::time::sleep(REPLY_DELAY + Duration::from_millis(1)).await;

    let Json(done) = chat_status(State(state.clone())).await;
    assert!(!done.pending);
    assert_eq!(done.count, 3);

    let Json(messages) = list_messages(State(state)).await;
    assert_eq!(messages[2].content, CANNED_REPLIES[0]);
}

#[test]
fn chat_status_serializes_fields() {
    let json = serde_json::to_value(ChatStatus { pending: true, count: 4 }).unwrap();
    assert_eq!(json, serde_json::json!({ "pending": true, "count": 4 }));
}
