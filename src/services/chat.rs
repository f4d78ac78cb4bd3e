//! Conversation simulator — append-only message list with a single pending reply.
//!
//! DESIGN
//! ======
//! `submit` appends the user message and flips `pending` under one lock
//! acquisition, then spawns a task that awaits the responder and appends
//! its reply. While `pending` is set, further submits are ignored, so at
//! most one reply is ever in flight.
//!
//! ERROR HANDLING
//! ==============
//! Empty input and busy submits are silent no-ops (`submit` returns `false`).
//! A failing responder still produces exactly one assistant message, flagged
//! `is_error`, so the conversation never stalls in the pending state.
//!
//! LIFETIME
//! ========
//! The in-flight reply task is aborted when the simulator is dropped.

use std::sync::{Arc, Mutex};

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::lock;
use crate::backend::Responder;
use crate::types::{ErrorCode, Message};

pub const UNAVAILABLE_REPLY: &str =
    "Sorry, the technical support service is unavailable right now. Please try again in a moment.";

struct ChatState {
    messages: Vec<Message>,
    pending: bool,
}

pub struct ConversationSimulator {
    state: Arc<Mutex<ChatState>>,
    responder: Arc<dyn Responder>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl ConversationSimulator {
    /// Create a simulator seeded with `initial` messages.
    #[must_use]
    pub fn new(responder: Arc<dyn Responder>, initial: Vec<Message>) -> Self {
        Self {
            state: Arc::new(Mutex::new(ChatState { messages: initial, pending: false })),
            responder,
            task: Mutex::new(None),
        }
    }

    /// Create a simulator that opens with the assistant greeting.
    #[must_use]
    pub fn with_greeting(responder: Arc<dyn Responder>) -> Self {
        Self::new(responder, vec![super::seed::greeting()])
    }

    /// Submit a user question. Returns `false` without touching state if the
    /// text is blank or a reply is still pending.
    ///
    /// Must be called from within a tokio runtime.
    pub fn submit(&self, text: &str) -> bool {
        if text.trim().is_empty() {
            debug!("chat: ignoring blank submit");
            return false;
        }

        {
            let mut state = lock(&self.state);
            if state.pending {
                debug!("chat: ignoring submit while reply pending");
                return false;
            }
            state.messages.push(Message::user(text));
            state.pending = true;
        }
        info!(text_len = text.len(), "chat: question submitted");

        let state = Arc::clone(&self.state);
        let responder = Arc::clone(&self.responder);
        let question = text.to_string();
        let handle = tokio::spawn(async move {
            let reply = match responder.respond(&question).await {
                Ok(reply) => reply,
                Err(e) => {
                    warn!(error = %e, code = e.error_code(), retryable = e.retryable(), "chat: responder failed");
                    Message::assistant_error(UNAVAILABLE_REPLY)
                }
            };
            let is_error = reply.is_error();
            let mut state = lock(&state);
            state.messages.push(reply);
            state.pending = false;
            info!(message_count = state.messages.len(), is_error, "chat: reply appended");
        });

        *lock(&self.task) = Some(handle);
        true
    }

    /// Snapshot of the conversation in insertion order.
    #[must_use]
    pub fn messages(&self) -> Vec<Message> {
        lock(&self.state).messages.clone()
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        lock(&self.state).pending
    }

    #[must_use]
    pub fn len(&self) -> usize {
        lock(&self.state).messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        lock(&self.state).messages.is_empty()
    }
}

impl Drop for ConversationSimulator {
    fn drop(&mut self) {
        if let Some(handle) = lock(&self.task).take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;
