//! Document routes.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};

use crate::state::AppState;
use crate::types::{Document, DocumentStatus};

/// Document list tabs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentView {
    #[default]
    All,
    Recent,
    Processing,
}

#[derive(Debug, Default, Deserialize)]
pub struct DocumentQuery {
    #[serde(default)]
    pub view: DocumentView,
    pub status: Option<DocumentStatus>,
}

#[derive(Debug, Serialize)]
pub struct StartResponse {
    pub started: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadStatus {
    pub in_progress: bool,
    pub progress: u32,
}

/// `GET /api/documents[?view=all|recent|processing][&status=Processed|Processing]`
pub async fn list_documents(
    State(state): State<AppState>,
    Query(query): Query<DocumentQuery>,
) -> Json<Vec<Document>> {
    let mut docs = match query.view {
        DocumentView::All => state.uploads.documents(),
        DocumentView::Recent => state.uploads.recent_documents(),
        DocumentView::Processing => state.uploads.documents_with_status(DocumentStatus::Processing),
    };
    if let Some(status) = query.status {
        docs.retain(|d| d.status == status);
    }
    Json(docs)
}

/// `POST /api/documents/upload` — `202` when a run starts, `200` with
/// `started: false` if one is already in progress.
pub async fn start_upload(State(state): State<AppState>) -> (StatusCode, Json<StartResponse>) {
    let started = state.uploads.start();
    let status = if started { StatusCode::ACCEPTED } else { StatusCode::OK };
    (status, Json(StartResponse { started }))
}

/// `GET /api/documents/upload`
pub async fn upload_status(State(state): State<AppState>) -> Json<UploadStatus> {
    Json(UploadStatus { in_progress: state.uploads.is_uploading(), progress: state.uploads.progress() })
}

/// `DELETE /api/documents/{id}` — `204` if removed, `404` if unknown.
pub async fn delete_document(State(state): State<AppState>, Path(id): Path<String>) -> StatusCode {
    if state.uploads.delete(&id) { StatusCode::NO_CONTENT } else { StatusCode::NOT_FOUND }
}

#[cfg(test)]
#[path = "documents_test.rs"]
mod tests;
