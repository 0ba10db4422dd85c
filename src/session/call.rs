use chrono::{DateTime, Utc};
use serde::Serialize;

/// Routing category chosen for a call at the menu, fixed for the call's
/// lifetime once set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Department {
    Sales,
    Service,
    Billing,
    AfterHours,
}

impl Department {
    /// Parse the URL path segment used in webhook addresses.
    pub fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "sales" => Some(Department::Sales),
            "service" => Some(Department::Service),
            "billing" => Some(Department::Billing),
            "afterhours" => Some(Department::AfterHours),
            _ => None,
        }
    }

    pub fn as_segment(&self) -> &'static str {
        match self {
            Department::Sales => "sales",
            Department::Service => "service",
            Department::Billing => "billing",
            Department::AfterHours => "afterhours",
        }
    }

    /// Label of the department's free-text field, also its URL segment.
    pub fn detail_field(&self) -> &'static str {
        match self {
            Department::Sales => "project",
            Department::Service => "issue",
            Department::Billing => "reason",
            Department::AfterHours => "message",
        }
    }

    /// Role tag leading the department's summary record.
    pub fn role_tag(&self) -> &'static str {
        match self {
            Department::Sales => "SALES",
            Department::Service => "SERVICE",
            Department::Billing => "BILLING",
            Department::AfterHours => "AFTERHOURS",
        }
    }

    /// Whether transcribed text for this department is urgency-classified.
    pub fn classifies_urgency(&self) -> bool {
        matches!(self, Department::Service | Department::AfterHours)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    Normal,
    Urgent,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Normal => "normal",
            Priority::Urgent => "urgent",
        }
    }
}

/// Per-call state threaded across the platform's stateless callbacks.
///
/// Fields fill in incrementally as the caller advances; none is ever
/// validated for format. `detail` holds the department-specific free-text
/// field (project / issue / reason / message).
#[derive(Debug, Clone, Serialize)]
pub struct CallSession {
    pub department: Option<Department>,
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub detail: Option<String>,
    /// Sales only: preferred callback time, stored as spoken.
    pub callback_time: Option<String>,
    pub priority: Priority,
    pub updated_at: DateTime<Utc>,
}

impl CallSession {
    pub fn new() -> Self {
        Self {
            department: None,
            name: None,
            address: None,
            phone: None,
            detail: None,
            callback_time: None,
            priority: Priority::default(),
            updated_at: Utc::now(),
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Default for CallSession {
    fn default() -> Self {
        Self::new()
    }
}

/// An in-flight voice recording awaiting its transcription callback.
#[derive(Debug, Clone)]
pub struct PendingRecording {
    pub call_sid: String,
    /// Session field the transcription lands in ("issue" or "message").
    pub field: &'static str,
    pub created_at: DateTime<Utc>,
}

impl PendingRecording {
    pub fn new(call_sid: impl Into<String>, field: &'static str) -> Self {
        Self {
            call_sid: call_sid.into(),
            field,
            created_at: Utc::now(),
        }
    }
}
