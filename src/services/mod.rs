//! Simulator services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Each simulator owns its own session-local state and the handle of its
//! in-flight background task. Route handlers only call the public
//! operations and read snapshots.

pub mod chat;
pub mod documents;
pub mod seed;

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Lock a std mutex, recovering the data if a previous holder panicked.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
