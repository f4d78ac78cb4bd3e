//! Chat routes.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};

use crate::state::AppState;
use crate::types::Message;

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub accepted: bool,
}

#[derive(Debug, Serialize)]
pub struct ChatStatus {
    pub pending: bool,
    pub count: usize,
}

/// `GET /api/chat/messages` — the conversation in insertion order.
pub async fn list_messages(State(state): State<AppState>) -> Json<Vec<Message>> {
    Json(state.chat.messages())
}

/// `POST /api/chat/messages` — submit a question.
///
/// `202` when accepted; `200` with `accepted: false` for blank input or
/// while a reply is pending.
pub async fn submit_message(
    State(state): State<AppState>,
    Json(body): Json<SubmitRequest>,
) -> (StatusCode, Json<SubmitResponse>) {
    let accepted = state.chat.submit(&body.content);
    let status = if accepted { StatusCode::ACCEPTED } else { StatusCode::OK };
    (status, Json(SubmitResponse { accepted }))
}

/// `GET /api/chat/status`
pub async fn chat_status(State(state): State<AppState>) -> Json<ChatStatus> {
    Json(ChatStatus { pending: state.chat.is_pending(), count: state.chat.len() })
}

#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;
