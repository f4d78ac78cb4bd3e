//! Shared domain types — messages, documents, and error codes.
//!
//! DESIGN
//! ======
//! Both records are immutable once built. Conversation and document lists
//! only ever append, prepend, or remove whole records, so there is no
//! per-field mutation API here.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// ERROR CODES
// =============================================================================

/// Grepable error code and retryable flag for backend failures.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}

// =============================================================================
// TIME
// =============================================================================

/// Current time as milliseconds since Unix epoch.
#[must_use]
pub fn now_ms() -> i64 {
    let Ok(dur) = SystemTime::now().duration_since(UNIX_EPOCH) else {
        return 0;
    };
    i64::try_from(dur.as_millis()).unwrap_or(0)
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// MESSAGE
// =============================================================================

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A single chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub content: String,
    pub role: Role,
    /// Milliseconds since Unix epoch. Set at construction.
    pub timestamp: i64,
    /// Display hint: the reply is a refusal or a failure notice.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

impl Message {
    fn new(role: Role, content: impl Into<String>, is_error: Option<bool>) -> Self {
        Self { id: new_id(), content: content.into(), role, timestamp: now_ms(), is_error }
    }

    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content, None)
    }

    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content, None)
    }

    /// Assistant message flagged `is_error = true`.
    #[must_use]
    pub fn assistant_error(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content, Some(true))
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.is_error.unwrap_or(false)
    }
}

// =============================================================================
// DOCUMENT
// =============================================================================

/// Processing state of an uploaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentStatus {
    Processed,
    Processing,
}

/// An uploaded technical document. `size` and `date` are display strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub name: String,
    pub size: String,
    pub date: String,
    pub status: DocumentStatus,
}

impl Document {
    /// Build a document with a fresh unique id.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        size: impl Into<String>,
        date: impl Into<String>,
        status: DocumentStatus,
    ) -> Self {
        Self { id: new_id(), name: name.into(), size: size.into(), date: date.into(), status }
    }

    /// "Recently Added": dated in days ("2 days ago") or just uploaded.
    #[must_use]
    pub fn is_recent(&self) -> bool {
        self.date.contains("day") || self.date.contains("Just now")
    }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
