//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds one conversation simulator and one upload simulator for the life
//! of the process. Nothing is persisted; a restart resets both.

use std::sync::Arc;

use crate::backend::Backends;
use crate::services::chat::ConversationSimulator;
use crate::services::documents::UploadSimulator;

/// Clone is required by Axum; both simulators are Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub chat: Arc<ConversationSimulator>,
    pub uploads: Arc<UploadSimulator>,
}

impl AppState {
    /// Build state seeded with the greeting and the sample manuals.
    #[must_use]
    pub fn new(backends: Backends) -> Self {
        Self {
            chat: Arc::new(ConversationSimulator::with_greeting(backends.responder)),
            uploads: Arc::new(UploadSimulator::with_samples(backends.uploader)),
        }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
