//! HTTP backend — chat and upload against a support service.
//!
//! Thin reqwest wrappers for the document routes (`POST /upload` as a
//! multipart form, then `GET /{id}/status` until processing settles) and for
//! a `POST /chat` question endpoint. Wire parsing lives in pure functions so
//! most of it can be tested without a server.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use super::ticker::{PLACEHOLDER_DATE, PROGRESS_COMPLETE, UPLOAD_TICK};
use super::{BackendError, Responder, Uploader};
use crate::config::{BackendTimeouts, UploadSource};
use crate::types::{Document, DocumentStatus, Message};

/// Status polls before an upload is abandoned (10 minutes at the tick rate).
pub const MAX_STATUS_POLLS: u32 = 3000;

/// Largest file the document service accepts.
pub const MAX_UPLOAD_BYTES: u64 = 50 * 1024 * 1024;

/// Build the shared reqwest client with configured timeouts.
///
/// # Errors
///
/// Returns [`BackendError::HttpClientBuild`] if the TLS backend fails to load.
pub fn build_client(timeouts: BackendTimeouts) -> Result<reqwest::Client, BackendError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeouts.request_secs))
        .connect_timeout(Duration::from_secs(timeouts.connect_secs))
        .build()
        .map_err(|e| BackendError::HttpClientBuild(e.to_string()))
}

async fn read_body(response: reqwest::Response) -> Result<String, BackendError> {
    let status = response.status().as_u16();
    let text = response
        .text()
        .await
        .map_err(|e| BackendError::Request(e.to_string()))?;

    if !(200..300).contains(&status) {
        return Err(BackendError::Response { status, body: text });
    }
    Ok(text)
}

// =============================================================================
// RESPONDER
// =============================================================================

pub struct HttpResponder {
    http: reqwest::Client,
    base_url: String,
}

impl HttpResponder {
    #[must_use]
    pub fn new(http: reqwest::Client, base_url: String) -> Self {
        Self { http, base_url }
    }
}

#[async_trait::async_trait]
impl Responder for HttpResponder {
    async fn respond(&self, text: &str) -> Result<Message, BackendError> {
        let response = self
            .http
            .post(format!("{}/chat", self.base_url))
            .json(&ChatRequest { query: text })
            .send()
            .await
            .map_err(|e| BackendError::Request(e.to_string()))?;

        parse_chat_response(&read_body(response).await?)
    }
}

// =============================================================================
// UPLOADER
// =============================================================================

pub struct HttpUploader {
    http: reqwest::Client,
    base_url: String,
    source: UploadSource,
    poll_interval: Duration,
    max_polls: u32,
}

impl HttpUploader {
    #[must_use]
    pub fn new(http: reqwest::Client, base_url: String, source: UploadSource) -> Self {
        Self { http, base_url, source, poll_interval: UPLOAD_TICK, max_polls: MAX_STATUS_POLLS }
    }

    /// Override the status poll cadence.
    #[must_use]
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Override how many status polls run before the upload is abandoned.
    #[must_use]
    pub fn with_max_polls(mut self, max_polls: u32) -> Self {
        self.max_polls = max_polls;
        self
    }

    async fn read_source(&self) -> Result<(String, Vec<u8>), BackendError> {
        let Some(path) = &self.source.path else {
            return Err(BackendError::Source("UPLOAD_DOCUMENT_PATH is not set".into()));
        };
        let unreadable = |e: std::io::Error| BackendError::Source(format!("{}: {e}", path.display()));

        let len = tokio::fs::metadata(path).await.map_err(unreadable)?.len();
        if len > MAX_UPLOAD_BYTES {
            return Err(BackendError::Source(format!(
                "{} is {len} bytes, limit is {MAX_UPLOAD_BYTES}",
                path.display()
            )));
        }
        let bytes = tokio::fs::read(path).await.map_err(unreadable)?;
        Ok((self.source.file_name(), bytes))
    }

    async fn send_file(&self, name: String, bytes: Vec<u8>) -> Result<DocumentResponse, BackendError> {
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(name.clone())
            .mime_str(content_type_for(&name))
            .map_err(|e| BackendError::Request(e.to_string()))?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .http
            .post(format!("{}/upload", self.base_url))
            .multipart(form)
            .send()
            .await
            .map_err(|e| BackendError::Request(e.to_string()))?;

        parse_document_response(&read_body(response).await?)
    }

    async fn poll_status(&self, document_id: i64) -> Result<StatusUpdate, BackendError> {
        let response = self
            .http
            .get(format!("{}/{document_id}/status", self.base_url))
            .send()
            .await
            .map_err(|e| BackendError::Request(e.to_string()))?;

        parse_status_response(&read_body(response).await?)
    }
}

#[async_trait::async_trait]
impl Uploader for HttpUploader {
    async fn upload(&self, progress: &watch::Sender<u32>) -> Result<Document, BackendError> {
        let (name, bytes) = self.read_source().await?;
        let created = self.send_file(name, bytes).await?;
        info!(document_id = created.document_id, name = %created.name, status = %created.status, "upload: accepted");

        let mut ticker = tokio::time::interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut status = created.status.clone();
        for _ in 0..self.max_polls {
            ticker.tick().await;
            let update = self.poll_status(created.document_id).await?;
            if update.status == "failed" {
                return Err(BackendError::UploadFailed {
                    document_id: created.document_id.to_string(),
                    message: update.message.unwrap_or_else(|| "processing failed".into()),
                });
            }
            let percent = update.progress.unwrap_or(0).min(PROGRESS_COMPLETE);
            progress.send_replace(percent);
            debug!(document_id = created.document_id, progress = percent, status = %update.status, "upload: poll");

            status = update.status;
            if status == "completed" || percent >= PROGRESS_COMPLETE {
                return Ok(created.into_document(&status));
            }
        }

        Err(BackendError::Request(format!(
            "document {} still {status} after {} status polls",
            created.document_id, self.max_polls
        )))
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
struct ChatRequest<'a> {
    query: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    response: String,
    #[serde(default)]
    is_off_topic: bool,
}

#[derive(Debug, Deserialize)]
struct DocumentResponse {
    document_id: i64,
    name: String,
    #[serde(default)]
    size: Option<u64>,
    status: String,
}

impl DocumentResponse {
    fn into_document(self, status: &str) -> Document {
        Document {
            id: self.document_id.to_string(),
            name: self.name,
            size: self.size.map_or_else(|| "Unknown size".to_string(), format_size),
            date: PLACEHOLDER_DATE.to_string(),
            status: map_status(status),
        }
    }
}

#[derive(Debug, Deserialize)]
struct StatusUpdate {
    status: String,
    #[serde(default)]
    progress: Option<u32>,
    #[serde(default)]
    message: Option<String>,
}

// =============================================================================
// PARSING
// =============================================================================

fn parse_chat_response(json: &str) -> Result<Message, BackendError> {
    let api: ChatResponse = serde_json::from_str(json).map_err(|e| BackendError::Parse(e.to_string()))?;
    if api.is_off_topic {
        Ok(Message::assistant_error(api.response))
    } else {
        Ok(Message::assistant(api.response))
    }
}

fn parse_document_response(json: &str) -> Result<DocumentResponse, BackendError> {
    serde_json::from_str(json).map_err(|e| BackendError::Parse(e.to_string()))
}

fn parse_status_response(json: &str) -> Result<StatusUpdate, BackendError> {
    serde_json::from_str(json).map_err(|e| BackendError::Parse(e.to_string()))
}

/// MIME type for the formats the document service ingests.
fn content_type_for(name: &str) -> &'static str {
    let ext = name.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase()).unwrap_or_default();
    match ext.as_str() {
        "pdf" => "application/pdf",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "doc" => "application/msword",
        "txt" => "text/plain",
        "md" => "text/markdown",
        _ => "application/octet-stream",
    }
}

/// Only a completed document counts as processed.
fn map_status(raw: &str) -> DocumentStatus {
    if raw == "completed" { DocumentStatus::Processed } else { DocumentStatus::Processing }
}

/// Render a byte count the way the document list shows it, e.g. `3.7 MB`.
#[allow(clippy::cast_precision_loss)]
fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    let b = bytes as f64;
    if b >= MB {
        format!("{:.1} MB", b / MB)
    } else if b >= KB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{bytes} B")
    }
}

#[cfg(test)]
#[path = "http_test.rs"]
mod tests;
