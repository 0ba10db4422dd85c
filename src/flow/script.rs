//! The per-department collection script: which step follows which, what each
//! step asks, and where each collected value lands in the session.
//!
//! Every department runs Name -> Address -> Phone -> free-text field; Sales
//! adds a callback-time step, Service captures its free-text field as a
//! voice recording, and the after-hours flow collects a single recorded
//! message.

use crate::session::{CallSession, Department};
use crate::twiml::GatherInput;

/// One collection step in a department's script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Name,
    Address,
    Phone,
    /// Department-specific free-text field (project / issue / reason / message).
    Detail,
    /// Sales only: preferred callback time.
    Callback,
}

impl Step {
    /// Parse a URL path segment for the department's script. The free-text
    /// step uses the department's own field label as its segment, so
    /// `/voice/service/issue` and `/voice/billing/reason` both land on
    /// `Detail`. Segments outside the department's script parse to `None`.
    pub fn from_segment(department: Department, segment: &str) -> Option<Self> {
        match (department, segment) {
            (Department::AfterHours, s) if s == Department::AfterHours.detail_field() => {
                Some(Step::Detail)
            }
            (Department::AfterHours, _) => None,
            (_, "name") => Some(Step::Name),
            (_, "address") => Some(Step::Address),
            (_, "phone") => Some(Step::Phone),
            (Department::Sales, "callback") => Some(Step::Callback),
            (d, s) if s == d.detail_field() => Some(Step::Detail),
            _ => None,
        }
    }

    pub fn segment(&self, department: Department) -> &'static str {
        match self {
            Step::Name => "name",
            Step::Address => "address",
            Step::Phone => "phone",
            Step::Detail => department.detail_field(),
            Step::Callback => "callback",
        }
    }
}

/// What the handler emits after storing a step's value.
#[derive(Debug, Clone)]
pub enum NextAction {
    /// Prompt and gather toward the named step's handler.
    Collect {
        step: Step,
        input: GatherInput,
        num_digits: Option<u8>,
        prompt: &'static str,
    },
    /// Speak the prompt, then record the caller toward the detail step's
    /// handler with async transcription.
    RecordDetail { prompt: &'static str },
    /// Terminal: speak the closing statement. `emit_summary` marks the
    /// departments whose record is complete here rather than at the
    /// transcription callback.
    Close {
        statement: &'static str,
        emit_summary: bool,
    },
}

pub const GREETING: &str = "Thank you for calling Roofline Roofing.";

pub const MENU_PROMPT: &str = "For a new roof estimate, press 1 or say sales. \
     For repairs or service, press 2 or say service. \
     For billing or anything else, press 3.";

pub const MENU_REPROMPT: &str =
    "Sorry, I didn't catch that. For a new roof estimate, press 1 or say sales. \
     For repairs or service, press 2 or say service. For billing or anything else, press 3.";

pub const CLOSED_MESSAGE: &str = "Thank you for calling Roofline Roofing. \
     Our office is currently closed. Office hours are Monday through Friday, \
     seven A M to five P M Eastern. Please leave your name, phone number, and \
     a brief message after the tone, and we will return your call on the next \
     business day.";

pub const AFTER_HOURS_CLOSING: &str =
    "Thank you. We have received your message and will return your call on the \
     next business day. Goodbye.";

/// The first instruction after routing: ask for the caller's name.
pub fn intro(department: Department) -> NextAction {
    let prompt = match department {
        Department::Sales => {
            "Great, we can help with that. To get started, please tell me your name."
        }
        Department::Service => {
            "We're sorry you're having trouble. To get started, please tell me your name."
        }
        Department::Billing | Department::AfterHours => "Sure. Please tell me your name.",
    };
    NextAction::Collect {
        step: Step::Name,
        input: GatherInput::Speech,
        num_digits: None,
        prompt,
    }
}

/// The instruction that follows a completed step.
pub fn after(department: Department, step: Step) -> NextAction {
    match (department, step) {
        (_, Step::Name) => NextAction::Collect {
            step: Step::Address,
            input: GatherInput::Speech,
            num_digits: None,
            prompt: "Thanks. What is the address of the property, including the city?",
        },
        (_, Step::Address) => NextAction::Collect {
            step: Step::Phone,
            input: GatherInput::Digits,
            num_digits: Some(10),
            prompt: "Using your keypad, please enter the best ten digit phone number to reach you.",
        },
        (Department::Sales, Step::Phone) => NextAction::Collect {
            step: Step::Detail,
            input: GatherInput::Speech,
            num_digits: None,
            prompt: "Briefly, tell me about your project. For example, a full replacement, \
                     a new build, or an inspection.",
        },
        (Department::Service, Step::Phone) => NextAction::RecordDetail {
            prompt: "Please describe the issue you're having in as much detail as you can, \
                     after the tone. Press any key when you are finished.",
        },
        (Department::Billing, Step::Phone) => NextAction::Collect {
            step: Step::Detail,
            input: GatherInput::Speech,
            num_digits: None,
            prompt: "Briefly, what is your billing question about?",
        },
        (Department::Sales, Step::Detail) => NextAction::Collect {
            step: Step::Callback,
            input: GatherInput::Speech,
            num_digits: None,
            prompt: "Last question. What is the best day and time to call you back?",
        },
        (Department::Sales, Step::Callback) => NextAction::Close {
            statement: "Thank you. One of our estimators will call you back at the time \
                        you requested. Goodbye.",
            emit_summary: true,
        },
        (Department::Service, Step::Detail) => NextAction::Close {
            statement: "Thank you. Our service team will review your issue and call you \
                        back as soon as possible. Goodbye.",
            emit_summary: false,
        },
        (Department::Billing, Step::Detail) => NextAction::Close {
            statement: "Thank you. Our billing team will get back to you within one \
                        business day. Goodbye.",
            emit_summary: true,
        },
        (Department::AfterHours, Step::Detail) => NextAction::Close {
            statement: AFTER_HOURS_CLOSING,
            emit_summary: false,
        },
        // Unreachable pairings parse to None in from_segment
        (Department::AfterHours, _) | (_, Step::Callback) => NextAction::Close {
            statement: AFTER_HOURS_CLOSING,
            emit_summary: false,
        },
    }
}

/// Store a collected value under the field the step targets.
pub fn store_value(session: &mut CallSession, step: Step, value: String) {
    match step {
        Step::Name => session.name = Some(value),
        Step::Address => session.address = Some(value),
        Step::Phone => session.phone = Some(value),
        Step::Detail => session.detail = Some(value),
        Step::Callback => session.callback_time = Some(value),
    }
}
