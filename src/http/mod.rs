//! HTTP webhook surface for the telephony platform
//!
//! This module provides the endpoints the platform posts to as a call
//! progresses:
//! - POST /voice - entry point (business-hours gate, session reset)
//! - POST /voice/menu - department routing
//! - POST /voice/:department - first collection step (name)
//! - POST /voice/:department/:step - collection chain
//! - POST /voice/transcription - async transcription results
//! - GET /calls/:call_sid - session snapshot
//! - GET /health - health check

mod handlers;
mod routes;
mod state;

pub use handlers::{TranscriptionWebhook, VoiceWebhook};
pub use routes::create_router;
pub use state::AppState;
