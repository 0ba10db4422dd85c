pub mod classify;
pub mod config;
pub mod error;
pub mod flow;
pub mod hours;
pub mod http;
pub mod session;
pub mod summary;
pub mod twiml;

pub use config::{Config, MenuFallback};
pub use error::{AppError, AppResult};
pub use http::{create_router, AppState};
pub use session::{CallSession, Department, InMemoryStore, PendingRecording, Priority, SessionStore};
pub use summary::{LeadSummary, LogSummarySink, SummarySink};
pub use twiml::{Gather, GatherInput, Record, VoiceResponse};
