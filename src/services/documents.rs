//! Upload simulator — one upload run at a time over a session document list.
//!
//! DESIGN
//! ======
//! `start` claims the in-progress flag under the lock and spawns a task
//! that drives the uploader. Progress flows through a `watch` channel so
//! readers never contend with the uploader. When the run ends the flag is
//! cleared, progress returns to 0, and a successful run's document is
//! prepended. Document ids stay unique: a returned document replaces any
//! existing entry with the same id.
//!
//! The in-flight upload task is aborted when the simulator is dropped.

use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::lock;
use crate::backend::Uploader;
use crate::types::{Document, DocumentStatus, ErrorCode};

struct LibraryState {
    documents: Vec<Document>,
    uploading: bool,
}

pub struct UploadSimulator {
    state: Arc<Mutex<LibraryState>>,
    progress: Arc<watch::Sender<u32>>,
    uploader: Arc<dyn Uploader>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl UploadSimulator {
    /// Create a simulator over `initial` documents.
    #[must_use]
    pub fn new(uploader: Arc<dyn Uploader>, initial: Vec<Document>) -> Self {
        let (progress, _) = watch::channel(0);
        Self {
            state: Arc::new(Mutex::new(LibraryState { documents: initial, uploading: false })),
            progress: Arc::new(progress),
            uploader,
            task: Mutex::new(None),
        }
    }

    /// Create a simulator holding the sample manuals.
    #[must_use]
    pub fn with_samples(uploader: Arc<dyn Uploader>) -> Self {
        Self::new(uploader, super::seed::sample_documents())
    }

    /// Begin an upload run. Returns `false` if one is already in progress.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&self) -> bool {
        {
            let mut state = lock(&self.state);
            if state.uploading {
                debug!("upload: ignoring start while in progress");
                return false;
            }
            state.uploading = true;
        }
        self.progress.send_replace(0);
        info!("upload: started");

        let state = Arc::clone(&self.state);
        let progress = Arc::clone(&self.progress);
        let uploader = Arc::clone(&self.uploader);
        let handle = tokio::spawn(async move {
            let result = uploader.upload(&progress).await;

            let mut state = lock(&state);
            state.uploading = false;
            progress.send_replace(0);
            match result {
                Ok(doc) => {
                    info!(id = %doc.id, name = %doc.name, "upload: document added");
                    state.documents.retain(|d| d.id != doc.id);
                    state.documents.insert(0, doc);
                }
                Err(e) => {
                    warn!(error = %e, code = e.error_code(), retryable = e.retryable(), "upload: failed");
                }
            }
        });

        *lock(&self.task) = Some(handle);
        true
    }

    /// Remove the document with `id`. Returns `false` if no such document exists.
    pub fn delete(&self, id: &str) -> bool {
        let mut state = lock(&self.state);
        let before = state.documents.len();
        state.documents.retain(|d| d.id != id);
        let removed = state.documents.len() != before;
        if removed {
            info!(%id, "upload: document deleted");
        }
        removed
    }

    /// Snapshot of the document list, newest first.
    #[must_use]
    pub fn documents(&self) -> Vec<Document> {
        lock(&self.state).documents.clone()
    }

    #[must_use]
    pub fn documents_with_status(&self, status: DocumentStatus) -> Vec<Document> {
        lock(&self.state)
            .documents
            .iter()
            .filter(|d| d.status == status)
            .cloned()
            .collect()
    }

    /// Documents shown under "Recently Added".
    #[must_use]
    pub fn recent_documents(&self) -> Vec<Document> {
        lock(&self.state).documents.iter().filter(|d| d.is_recent()).cloned().collect()
    }

    /// Current upload progress, 0..=100.
    #[must_use]
    pub fn progress(&self) -> u32 {
        *self.progress.borrow()
    }

    #[must_use]
    pub fn is_uploading(&self) -> bool {
        lock(&self.state).uploading
    }

    /// Receiver that observes every progress change.
    #[must_use]
    pub fn subscribe_progress(&self) -> watch::Receiver<u32> {
        self.progress.subscribe()
    }
}

impl Drop for UploadSimulator {
    fn drop(&mut self) {
        if let Some(handle) = lock(&self.task).take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
#[path = "documents_test.rs"]
mod tests;
