//! Sample session state shown on first load.

use crate::types::{Document, DocumentStatus, Message};

pub const GREETING: &str = "Hello! I'm your AI technical support assistant. How can I help you today?";

/// Opening assistant message for a new conversation.
#[must_use]
pub fn greeting() -> Message {
    Message::assistant(GREETING)
}

/// The three processed manuals every new session starts with.
#[must_use]
pub fn sample_documents() -> Vec<Document> {
    [
        ("1", "Technical Manual v2.3.pdf", "4.2 MB", "2 days ago"),
        ("2", "Field Guide 2025.pdf", "2.8 MB", "1 week ago"),
        ("3", "Equipment Specs.pdf", "8.5 MB", "2 weeks ago"),
    ]
    .into_iter()
    .map(|(id, name, size, date)| Document {
        id: id.into(),
        name: name.into(),
        size: size.into(),
        date: date.into(),
        status: DocumentStatus::Processed,
    })
    .collect()
}

#[cfg(test)]
#[path = "seed_test.rs"]
mod tests;
