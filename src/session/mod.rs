//! Per-call session state
//!
//! This module provides the data model and store behind the call flow:
//! - `CallSession` accumulates caller-provided fields across callbacks
//! - `PendingRecording` correlates async transcriptions back to their call
//! - `SessionStore` is the keyed get/update/reset seam the handlers use,
//!   backed by the in-memory implementation with TTL eviction

mod call;
mod store;

pub use call::{CallSession, Department, PendingRecording, Priority};
pub use store::{InMemoryStore, SessionStore, SessionUpdate};
