//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! JSON endpoints over the two simulators. Handlers translate HTTP into
//! simulator calls and never hold simulator locks themselves.

pub mod chat;
pub mod documents;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{delete, get};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/chat/messages", get(chat::list_messages).post(chat::submit_message))
        .route("/api/chat/status", get(chat::chat_status))
        .route("/api/documents", get(documents::list_documents))
        .route(
            "/api/documents/upload",
            get(documents::upload_status).post(documents::start_upload),
        )
        .route("/api/documents/{id}", delete(documents::delete_document))
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
