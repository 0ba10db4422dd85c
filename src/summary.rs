//! Lead summary records.
//!
//! One record per completed department flow, emitted as a pipe-delimited
//! structured log line: role tag, name, phone, address or context field,
//! free-text field, priority (service and after-hours only), timestamp.
//! The sink is a trait so a real event transport can replace the log line.

use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

use crate::session::{CallSession, Department};

/// A department record assembled from a completed session.
#[derive(Debug, Clone)]
pub struct LeadSummary {
    pub department: Department,
    pub line: String,
}

impl LeadSummary {
    /// Build the summary for a session. Missing fields render empty; the
    /// flow never blocks on absent input, so neither does the record.
    pub fn from_session(department: Department, session: &CallSession) -> Self {
        let name = session.name.as_deref().unwrap_or_default();
        let phone = session.phone.as_deref().unwrap_or_default();
        let address = session.address.as_deref().unwrap_or_default();
        let detail = session.detail.as_deref().unwrap_or_default();
        let timestamp = Utc::now().to_rfc3339();

        let line = match department {
            Department::Sales => {
                let callback = session.callback_time.as_deref().unwrap_or_default();
                format!(
                    "SALES|{}|{}|{}|{}|{}|{}",
                    name, phone, address, detail, callback, timestamp
                )
            }
            Department::Service => format!(
                "SERVICE|{}|{}|{}|{}|{}|{}",
                name,
                phone,
                address,
                detail,
                session.priority.as_str(),
                timestamp
            ),
            Department::Billing => format!(
                "BILLING|{}|{}|{}|{}|{}",
                name, phone, address, detail, timestamp
            ),
            Department::AfterHours => format!(
                "AFTERHOURS|{}|{}|{}",
                detail,
                session.priority.as_str(),
                timestamp
            ),
        };

        Self { department, line }
    }
}

/// Destination for completed lead summaries.
#[async_trait]
pub trait SummarySink: Send + Sync {
    async fn emit(&self, summary: LeadSummary);
}

/// Default sink: one structured log line per lead under the `lead` target.
#[derive(Debug, Default)]
pub struct LogSummarySink;

#[async_trait]
impl SummarySink for LogSummarySink {
    async fn emit(&self, summary: LeadSummary) {
        info!(
            target: "lead",
            department = summary.department.role_tag(),
            "{}",
            summary.line
        );
    }
}
