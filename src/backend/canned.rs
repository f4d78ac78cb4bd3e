//! Canned responder — keyword gate plus a fixed answer pool.
//!
//! DESIGN
//! ======
//! After a fixed 1500 ms delay the question is checked, case-insensitively,
//! for any technical keyword. Off-topic questions get the refusal text
//! flagged as an error; on-topic questions get one of four canned answers.
//! Answer selection goes through `ReplyPicker` so tests can pin the choice.

use std::sync::Mutex;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::{BackendError, Responder};
use crate::types::Message;

/// Time between submit and the canned reply.
pub const REPLY_DELAY: Duration = Duration::from_millis(1500);

/// Substrings that mark a question as on-topic.
pub const TECHNICAL_KEYWORDS: [&str; 8] =
    ["manual", "equipment", "technical", "guide", "error", "sensor", "calibrate", "maintenance"];

pub const OFF_TOPIC_REPLY: &str = "I can only answer technical questions from the uploaded manuals. \
Please ask a question related to your technical documentation.";

pub const CANNED_REPLIES: [&str; 4] = [
    "According to the technical manual, you should calibrate the sensor by following these steps: \
1) Power off the device, 2) Press and hold the reset button for 5 seconds, 3) Power on while still \
holding the button, 4) Release when the LED flashes green.",
    "The maintenance schedule in the field guide recommends servicing the equipment every 3 months \
under normal conditions, or monthly in high-dust environments.",
    "Error code E-45 indicates a power supply issue. Check the input voltage and ensure it's within \
the specified range of 110-240V. If the voltage is correct, the internal power module may need replacement.",
    "The technical specifications indicate that the Model X-200 requires a 24V DC power supply with at \
least 2.5A current capacity. Always use the manufacturer-approved power adapter.",
];

/// `true` if `text` contains any technical keyword, ignoring case.
#[must_use]
pub fn is_on_topic(text: &str) -> bool {
    let lowered = text.to_lowercase();
    TECHNICAL_KEYWORDS.iter().any(|kw| lowered.contains(kw))
}

// =============================================================================
// REPLY PICKERS
// =============================================================================

/// Chooses an index into the canned reply pool.
pub trait ReplyPicker: Send + Sync {
    /// Return an index in `0..len`. `len` is never zero.
    fn pick(&self, len: usize) -> usize;
}

/// Uniform choice from the thread-local RNG.
pub struct ThreadRngPicker;

impl ReplyPicker for ThreadRngPicker {
    fn pick(&self, len: usize) -> usize {
        rand::rng().random_range(0..len)
    }
}

/// Uniform choice from a seeded `StdRng`, reproducible across runs.
pub struct SeededPicker {
    rng: Mutex<StdRng>,
}

impl SeededPicker {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self { rng: Mutex::new(StdRng::seed_from_u64(seed)) }
    }
}

impl ReplyPicker for SeededPicker {
    fn pick(&self, len: usize) -> usize {
        let mut rng = self
            .rng
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        rng.random_range(0..len)
    }
}

// =============================================================================
// RESPONDER
// =============================================================================

pub struct CannedResponder {
    picker: Box<dyn ReplyPicker>,
}

impl CannedResponder {
    pub fn new(picker: impl ReplyPicker + 'static) -> Self {
        Self { picker: Box::new(picker) }
    }

    /// Build the reply without waiting.
    #[must_use]
    pub fn reply_for(&self, text: &str) -> Message {
        if !is_on_topic(text) {
            debug!("canned: off-topic question");
            return Message::assistant_error(OFF_TOPIC_REPLY);
        }
        // Clamp so a misbehaving picker cannot index out of bounds.
        let index = self.picker.pick(CANNED_REPLIES.len()).min(CANNED_REPLIES.len() - 1);
        debug!(index, "canned: on-topic question");
        Message::assistant(CANNED_REPLIES[index])
    }
}

#[async_trait::async_trait]
impl Responder for CannedResponder {
    async fn respond(&self, text: &str) -> Result<Message, BackendError> {
        tokio::time::sleep(REPLY_DELAY).await;
        Ok(self.reply_for(text))
    }
}

#[cfg(test)]
#[path = "canned_test.rs"]
mod tests;
