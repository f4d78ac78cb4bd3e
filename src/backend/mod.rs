//! Backends — the async seams behind the chat and upload simulators.
//!
//! DESIGN
//! ======
//! The simulators never sleep or talk to the network themselves. They hand
//! the work to a `Responder` (chat) or an `Uploader` (documents) and apply the
//! result. The canned/timer implementations reproduce the demo behavior; the
//! HTTP implementations talk to a real support backend. Tests plug in mocks.

pub mod canned;
pub mod http;
pub mod ticker;

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};

use crate::config::{AppConfig, BackendMode};
use crate::types::{Document, ErrorCode, Message};

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by network-backed responders and uploaders.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The HTTP request to the support backend failed.
    #[error("backend request failed: {0}")]
    Request(String),

    /// The support backend returned a non-success HTTP status.
    #[error("backend response error: status {status}")]
    Response { status: u16, body: String },

    /// The response body could not be deserialized.
    #[error("backend response parse failed: {0}")]
    Parse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// The file to upload could not be read or exceeds the size limit.
    #[error("upload source unavailable: {0}")]
    Source(String),

    /// The backend reported that processing of an uploaded document failed.
    #[error("upload {document_id} failed: {message}")]
    UploadFailed { document_id: String, message: String },
}

impl ErrorCode for BackendError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Request(_) => "E_BACKEND_REQUEST",
            Self::Response { .. } => "E_BACKEND_RESPONSE",
            Self::Parse(_) => "E_BACKEND_PARSE",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
            Self::Source(_) => "E_UPLOAD_SOURCE",
            Self::UploadFailed { .. } => "E_UPLOAD_FAILED",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Request(_) | Self::Response { status: 429 | 500..=599, .. })
    }
}

// =============================================================================
// TRAITS
// =============================================================================

/// Produces one assistant reply for a user question. Enables mocking in tests.
#[async_trait::async_trait]
pub trait Responder: Send + Sync {
    /// Answer `text`. The returned message is appended as-is.
    ///
    /// # Errors
    ///
    /// Returns a [`BackendError`] if a network-backed responder fails.
    async fn respond(&self, text: &str) -> Result<Message, BackendError>;
}

/// Runs one upload to completion, reporting percent progress as it goes.
#[async_trait::async_trait]
pub trait Uploader: Send + Sync {
    /// Upload a document, sending 0..=100 progress values on `progress`.
    ///
    /// # Errors
    ///
    /// Returns a [`BackendError`] if a network-backed upload fails.
    async fn upload(&self, progress: &watch::Sender<u32>) -> Result<Document, BackendError>;
}

// =============================================================================
// CONSTRUCTION
// =============================================================================

/// The responder/uploader pair selected by configuration.
pub struct Backends {
    pub responder: Arc<dyn Responder>,
    pub uploader: Arc<dyn Uploader>,
}

impl Backends {
    /// Build backends for the configured mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, BackendError> {
        match &config.backend {
            BackendMode::Simulated => {
                let responder = match config.reply_seed {
                    Some(seed) => canned::CannedResponder::new(canned::SeededPicker::new(seed)),
                    None => canned::CannedResponder::new(canned::ThreadRngPicker),
                };
                info!(seeded = config.reply_seed.is_some(), "backend: simulated");
                Ok(Self { responder: Arc::new(responder), uploader: Arc::new(ticker::TickerUploader::new()) })
            }
            BackendMode::Http { base_url } => {
                let client = http::build_client(config.timeouts)?;
                info!(%base_url, "backend: http");
                if config.upload.path.is_none() {
                    warn!("backend: UPLOAD_DOCUMENT_PATH not set, uploads will fail");
                }
                Ok(Self {
                    responder: Arc::new(http::HttpResponder::new(client.clone(), base_url.clone())),
                    uploader: Arc::new(http::HttpUploader::new(client, base_url.clone(), config.upload.clone())),
                })
            }
        }
    }
}
