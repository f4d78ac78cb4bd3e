//! Technical support assistant simulators.
//!
//! ARCHITECTURE
//! ============
//! - `services::chat` — conversation simulator (keyword-gated canned replies).
//! - `services::documents` — upload simulator (fixed-step progress, document list).
//! - `backend` — the `Responder` / `Uploader` seams with canned, timer, and
//!   HTTP implementations.
//! - `routes` — JSON API over both simulators.

pub mod backend;
pub mod config;
pub mod routes;
pub mod services;
pub mod state;
pub mod types;
