use std::sync::Arc;

use crate::config::Config;
use crate::session::{InMemoryStore, SessionStore};
use crate::summary::{LogSummarySink, SummarySink};

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Call sessions and pending recordings, keyed by platform identifiers
    pub store: Arc<dyn SessionStore>,
    pub summaries: Arc<dyn SummarySink>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            store: Arc::new(InMemoryStore::new()),
            summaries: Arc::new(LogSummarySink),
        }
    }

    /// Swap the summary destination (tests use a capturing sink).
    pub fn with_summary_sink(mut self, sink: Arc<dyn SummarySink>) -> Self {
        self.summaries = sink;
        self
    }
}
