//! Ticker uploader — fixed-step progress on a fixed interval.
//!
//! Every 200 ms the current value is checked: at 100 or above the run
//! completes, otherwise it advances by 5. The first tick fires one interval
//! after start, so a full run takes 21 ticks.

use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::debug;

use super::{BackendError, Uploader};
use crate::types::{Document, DocumentStatus};

pub const UPLOAD_TICK: Duration = Duration::from_millis(200);
pub const PROGRESS_STEP: u32 = 5;
pub const PROGRESS_COMPLETE: u32 = 100;

pub const PLACEHOLDER_NAME: &str = "New Technical Document.pdf";
pub const PLACEHOLDER_SIZE: &str = "3.7 MB";
pub const PLACEHOLDER_DATE: &str = "Just now";

#[derive(Debug, Default)]
pub struct TickerUploader;

impl TickerUploader {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl Uploader for TickerUploader {
    async fn upload(&self, progress: &watch::Sender<u32>) -> Result<Document, BackendError> {
        let mut ticker = tokio::time::interval_at(Instant::now() + UPLOAD_TICK, UPLOAD_TICK);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut current = 0;
        progress.send_replace(current);
        loop {
            ticker.tick().await;
            if current >= PROGRESS_COMPLETE {
                break;
            }
            current += PROGRESS_STEP;
            progress.send_replace(current);
            debug!(progress = current, "upload: tick");
        }

        Ok(Document::new(PLACEHOLDER_NAME, PLACEHOLDER_SIZE, PLACEHOLDER_DATE, DocumentStatus::Processing))
    }
}

#[cfg(test)]
#[path = "ticker_test.rs"]
mod tests;
