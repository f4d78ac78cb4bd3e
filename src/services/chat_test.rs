use super::*;
use crate::backend::BackendError;
use crate::backend::canned::{CANNED_REPLIES, CannedResponder, OFF_TOPIC_REPLY, REPLY_DELAY, ReplyPicker};
use crate::types::Role;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

// =========================================================================
// Mocks
// =========================================================================

struct FixedPicker(usize);

impl ReplyPicker for FixedPicker {
    fn pick(&self, _len: usize) -> usize {
        self.0
    }
}

fn canned(index: usize) -> Arc<dyn Responder> {
    Arc::new(CannedResponder::new(FixedPicker(index)))
}

struct FailingResponder;

#[async_trait::async_trait]
impl Responder for FailingResponder {
    async fn respond(&self, _text: &str) -> Result<Message, BackendError> {
        Err(BackendError::Response { status: 503, body: "down".into() })
    }
}

/// Sets `done` only if its sleep is allowed to finish.
struct SlowResponder {
    done: Arc<AtomicBool>,
}

#[async_trait::async_trait]
impl Responder for SlowResponder {
    async fn respond(&self, _text: &str) -> Result<Message, BackendError> {
        tokio::time::sleep(Duration::from_secs(1)).await;
        self.done.store(true, Ordering::SeqCst);
        Ok(Message::assistant("late"))
    }
}

async fn settle() {
    tokio::time::sleep(REPLY_DELAY + Duration::from_millis(1)).await;
}

// =========================================================================
// submit — no-ops
// =========================================================================

#[tokio::test]
async fn blank_submit_leaves_messages_unchanged() {
    let chat = ConversationSimulator::with_greeting(canned(0));
    assert!(!chat.submit(""));
    assert!(!chat.submit("   \t\n"));
    assert_eq!(chat.len(), 1);
    assert!(!chat.is_pending());
}

#[tokio::test(start_paused = true)]
async fn submit_while_pending_is_ignored_until_reply() {
    let chat = ConversationSimulator::new(canned(0), Vec::new());
    assert!(chat.submit("technical question one"));
    assert!(!chat.submit("technical question two"));
    assert_eq!(chat.len(), 1);
    assert!(chat.is_pending());

    settle().await;
    assert_eq!(chat.len(), 2);
    assert!(!chat.is_pending());

    assert!(chat.submit("technical question two"));
    assert_eq!(chat.len(), 3);
}

// =========================================================================
// submit — replies
// =========================================================================

#[tokio::test(start_paused = true)]
async fn calibrate_sensor_question_gets_canned_answer() {
    let chat = ConversationSimulator::with_greeting(canned(2));
    assert!(chat.submit("How do I calibrate the sensor?"));

    let messages = chat.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1].role, Role::User);
    assert_eq!(messages[1].content, "How do I calibrate the sensor?");
    assert!(chat.is_pending());

    tokio::time::sleep(REPLY_DELAY - Duration::from_millis(1)).await;
    assert_eq!(chat.len(), 2, "reply must not land before the delay");
    assert!(chat.is_pending());

    tokio::time::sleep(Duration::from_millis(2)).await;
    let messages = chat.messages();
    assert_eq!(messages.len(), 3);
    let reply = &messages[2];
    assert_eq!(reply.role, Role::Assistant);
    assert!(reply.is_error.is_none());
    assert_eq!(reply.content, CANNED_REPLIES[2]);
    assert!(!chat.is_pending());
}

#[tokio::test(start_paused = true)]
async fn random_pick_stays_in_canned_pool() {
    let responder: Arc<dyn Responder> = Arc::new(CannedResponder::new(crate::backend::canned::ThreadRngPicker));
    let chat = ConversationSimulator::new(responder, Vec::new());
    for _ in 0..5 {
        assert!(chat.submit("equipment maintenance"));
        settle().await;
    }
    let replies: Vec<Message> = chat
        .messages()
        .into_iter()
        .filter(|m| m.role == Role::Assistant)
        .collect();
    assert_eq!(replies.len(), 5);
    assert!(replies.iter().all(|m| CANNED_REPLIES.contains(&m.content.as_str())));
}

#[tokio::test(start_paused = true)]
async fn weather_question_gets_refusal() {
    let chat = ConversationSimulator::with_greeting(canned(0));
    assert!(chat.submit("What's the weather?"));
    settle().await;

    let messages = chat.messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[2].is_error, Some(true));
    assert_eq!(messages[2].content, OFF_TOPIC_REPLY);
}

#[tokio::test(start_paused = true)]
async fn user_text_is_stored_untrimmed() {
    let chat = ConversationSimulator::new(canned(0), Vec::new());
    assert!(chat.submit("  manual page 4  "));
    assert_eq!(chat.messages()[0].content, "  manual page 4  ");
}

#[tokio::test(start_paused = true)]
async fn messages_keep_insertion_order() {
    let chat = ConversationSimulator::with_greeting(canned(1));
    for q in ["sensor?", "weather?", "guide?"] {
        assert!(chat.submit(q));
        settle().await;
    }
    let roles: Vec<Role> = chat.messages().iter().map(|m| m.role).collect();
    assert_eq!(
        roles,
        vec![Role::Assistant, Role::User, Role::Assistant, Role::User, Role::Assistant, Role::User, Role::Assistant]
    );
    let flags: Vec<bool> = chat.messages().iter().map(Message::is_error).collect();
    assert_eq!(flags, vec![false, false, false, false, true, false, false]);
}

// =========================================================================
// failures and lifetime
// =========================================================================

#[tokio::test]
async fn failing_responder_yields_one_error_reply() {
    let chat = ConversationSimulator::new(Arc::new(FailingResponder), Vec::new());
    assert!(chat.submit("error code E-45?"));

    for _ in 0..50 {
        if !chat.is_pending() {
            break;
        }
        tokio::task::yield_now().await;
    }

    let messages = chat.messages();
    assert_eq!(messages.len(), 2);
    assert!(messages[1].is_error());
    assert_eq!(messages[1].content, UNAVAILABLE_REPLY);
    assert!(!chat.is_pending());
}

#[tokio::test(start_paused = true)]
async fn dropping_simulator_aborts_pending_reply() {
    let done = Arc::new(AtomicBool::new(false));
    let chat = ConversationSimulator::new(Arc::new(SlowResponder { done: Arc::clone(&done) }), Vec::new());
    assert!(chat.submit("manual"));
    drop(chat);

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert!(!done.load(Ordering::SeqCst));
}

#[tokio::test]
async fn empty_initial_state_is_empty() {
    let chat = ConversationSimulator::new(canned(0), Vec::new());
    assert!(chat.is_empty());
    assert!(chat.messages().is_empty());
}
