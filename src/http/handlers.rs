use axum::{
    extract::{Form, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::Utc;
use serde::Deserialize;
use tracing::{info, warn};

use super::state::AppState;
use crate::classify::classify_urgency;
use crate::config::MenuFallback;
use crate::error::{AppError, AppResult};
use crate::flow::{
    self, NextAction, RouteDecision, Step, CLOSED_MESSAGE, GREETING, MENU_PROMPT, MENU_REPROMPT,
};
use crate::hours;
use crate::session::{CallSession, Department, PendingRecording};
use crate::summary::LeadSummary;
use crate::twiml::{Gather, GatherInput, Record, VoiceResponse};

const MENU_TIMEOUT_SECS: u32 = 5;
const GATHER_TIMEOUT_SECS: u32 = 8;
const RECORD_MAX_SECS: u32 = 120;

// ============================================================================
// Webhook payloads
// ============================================================================

/// Form body the platform posts to every voice endpoint. Only the fields the
/// flow reads; everything else the platform sends is ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VoiceWebhook {
    pub call_sid: Option<String>,
    pub from: Option<String>,
    pub speech_result: Option<String>,
    pub digits: Option<String>,
    pub recording_sid: Option<String>,
    pub recording_url: Option<String>,
}

impl VoiceWebhook {
    fn call_sid(&self) -> AppResult<&str> {
        self.call_sid
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(AppError::MissingCallSid)
    }

    /// Caller text for a collection step: speech preferred, then digits.
    /// Never validated for format.
    fn text_input(&self) -> Option<String> {
        self.speech_result
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .or_else(|| {
                self.digits
                    .as_deref()
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
            })
            .map(str::to_string)
    }

    fn recording_sid(&self) -> Option<&str> {
        self.recording_sid
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Async transcription callback body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TranscriptionWebhook {
    pub call_sid: Option<String>,
    pub recording_sid: Option<String>,
    pub transcription_text: Option<String>,
    pub transcription_status: Option<String>,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /voice
/// Entry point: reset the session, then greet into the menu or take an
/// after-hours message depending on the business-hours gate.
pub async fn entry(
    State(state): State<AppState>,
    Form(webhook): Form<VoiceWebhook>,
) -> AppResult<VoiceResponse> {
    let call_sid = webhook.call_sid()?;
    info!(
        "Incoming call {} from {}",
        call_sid,
        webhook.from.as_deref().unwrap_or("unknown")
    );

    state.store.reset(call_sid).await;

    if hours::is_open(Utc::now()) {
        return Ok(VoiceResponse::new().say(GREETING).gather(Gather {
            input: GatherInput::SpeechAndDigits,
            action: state.config.callback_url("/voice/menu"),
            prompt: MENU_PROMPT.to_string(),
            num_digits: Some(1),
            timeout_secs: MENU_TIMEOUT_SECS,
        }));
    }

    info!("Call {} arrived outside business hours", call_sid);
    state
        .store
        .update(
            call_sid,
            Box::new(|s| s.department = Some(Department::AfterHours)),
        )
        .await;

    Ok(VoiceResponse::new().say(CLOSED_MESSAGE).record(Record {
        action: state.config.callback_url("/voice/afterhours/message"),
        max_length_secs: RECORD_MAX_SECS,
        play_beep: true,
        transcribe_callback: Some(state.config.callback_url("/voice/transcription")),
    }))
}

/// POST /voice/menu
/// Decide the department from keypad digits or speech, then send the caller
/// to that department's first collection step.
pub async fn menu(
    State(state): State<AppState>,
    Form(webhook): Form<VoiceWebhook>,
) -> AppResult<VoiceResponse> {
    let call_sid = webhook.call_sid()?;

    let chosen = match flow::route_menu(webhook.digits.as_deref(), webhook.speech_result.as_deref())
    {
        RouteDecision::Department(dept) => dept,
        RouteDecision::NoMatch => match state.config.menu.fallback {
            MenuFallback::Billing => Department::Billing,
            MenuFallback::Reprompt => {
                info!("Call {}: menu input unmatched, re-prompting", call_sid);
                return Ok(VoiceResponse::new().gather(Gather {
                    input: GatherInput::SpeechAndDigits,
                    action: state.config.callback_url("/voice/menu"),
                    prompt: MENU_REPROMPT.to_string(),
                    num_digits: Some(1),
                    timeout_secs: MENU_TIMEOUT_SECS,
                }));
            }
        },
    };

    // Department is set at most once per call; a duplicate menu callback
    // keeps the first routing decision.
    let session = state
        .store
        .update(
            call_sid,
            Box::new(move |s| {
                s.department.get_or_insert(chosen);
            }),
        )
        .await;
    let department = session.department.unwrap_or(chosen);

    info!("Call {} routed to {}", call_sid, department.as_segment());

    Ok(VoiceResponse::new().redirect(
        &state
            .config
            .callback_url(&format!("/voice/{}", department.as_segment())),
    ))
}

/// POST /voice/:department
/// First collection step: ask for the caller's name.
pub async fn department_intro(
    State(state): State<AppState>,
    Path(department): Path<String>,
    Form(webhook): Form<VoiceWebhook>,
) -> AppResult<VoiceResponse> {
    let department = Department::from_segment(&department)
        .filter(|d| *d != Department::AfterHours)
        .ok_or_else(|| AppError::UnknownDepartment(department.clone()))?;
    let call_sid = webhook.call_sid()?;

    let session = state
        .store
        .update(
            call_sid,
            Box::new(move |s| {
                s.department.get_or_insert(department);
            }),
        )
        .await;

    Ok(respond(&state, call_sid, department, flow::intro(department), &session).await)
}

/// POST /voice/:department/:step
/// One step of the collection chain: store the caller's last input under the
/// step's field, then emit the next instruction.
pub async fn collect_step(
    State(state): State<AppState>,
    Path((department, step)): Path<(String, String)>,
    Form(webhook): Form<VoiceWebhook>,
) -> AppResult<VoiceResponse> {
    let department = Department::from_segment(&department)
        .ok_or_else(|| AppError::UnknownDepartment(department.clone()))?;
    let step = Step::from_segment(department, &step)
        .ok_or_else(|| AppError::UnknownStep(step.clone()))?;
    let call_sid = webhook.call_sid()?;

    if state.store.get(call_sid).await.is_none() {
        // Out-of-order or retried callback; tolerate with a fresh session.
        warn!("Call {} hit {:?} with no session", call_sid, step);
    }

    let session = if is_recorded(department, step) {
        match webhook.recording_sid() {
            Some(recording_sid) => {
                info!(
                    "Call {}: recording {} pending transcription into {}",
                    call_sid,
                    recording_sid,
                    department.detail_field()
                );
                state
                    .store
                    .register_recording(
                        recording_sid,
                        PendingRecording::new(call_sid, department.detail_field()),
                    )
                    .await;
            }
            None => warn!("Call {}: recording step without a recording", call_sid),
        }
        state
            .store
            .update(
                call_sid,
                Box::new(move |s| {
                    s.department.get_or_insert(department);
                }),
            )
            .await
    } else {
        let value = webhook.text_input();
        if value.is_none() {
            // No re-prompt loop: the field stays unset and the flow advances.
            warn!("Call {}: no usable input at {:?}", call_sid, step);
        }
        state
            .store
            .update(
                call_sid,
                Box::new(move |s| {
                    s.department.get_or_insert(department);
                    if let Some(value) = value {
                        flow::store_value(s, step, value);
                    }
                }),
            )
            .await
    };

    Ok(respond(&state, call_sid, department, flow::after(department, step), &session).await)
}

/// POST /voice/transcription
/// Async transcription result for a recorded field. Unknown or already
/// consumed recording identifiers are a no-op; this endpoint always
/// acknowledges success.
pub async fn transcription(
    State(state): State<AppState>,
    Form(webhook): Form<TranscriptionWebhook>,
) -> impl IntoResponse {
    let recording_sid = match webhook
        .recording_sid
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        Some(sid) => sid,
        None => {
            warn!("Transcription callback without a recording identifier");
            return StatusCode::OK;
        }
    };

    let pending = match state.store.consume_recording(recording_sid).await {
        Some(pending) => pending,
        None => {
            info!(
                "Transcription for unknown or already consumed recording {}",
                recording_sid
            );
            return StatusCode::OK;
        }
    };

    let text = webhook
        .transcription_text
        .as_deref()
        .map(str::trim)
        .unwrap_or_default()
        .to_string();
    info!(
        "Transcription for call {} ({} chars) -> {}",
        pending.call_sid,
        text.len(),
        pending.field
    );

    let priority = classify_urgency(&text);
    let fallback_dept = if pending.field == "message" {
        Department::AfterHours
    } else {
        Department::Service
    };

    let session = state
        .store
        .update(
            &pending.call_sid,
            Box::new(move |s| {
                s.detail = Some(text);
                let dept = *s.department.get_or_insert(fallback_dept);
                if dept.classifies_urgency() {
                    s.priority = priority;
                }
            }),
        )
        .await;

    let department = session.department.unwrap_or(fallback_dept);
    state
        .summaries
        .emit(LeadSummary::from_session(department, &session))
        .await;

    StatusCode::OK
}

/// GET /calls/:call_sid
/// Session snapshot for operational inspection.
pub async fn get_call(
    State(state): State<AppState>,
    Path(call_sid): Path<String>,
) -> AppResult<Json<CallSession>> {
    match state.store.get(&call_sid).await {
        Some(session) => Ok(Json(session)),
        None => Err(AppError::CallNotFound(call_sid)),
    }
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

// ============================================================================
// Helpers
// ============================================================================

fn is_recorded(department: Department, step: Step) -> bool {
    step == Step::Detail && department.classifies_urgency()
}

fn step_url(state: &AppState, department: Department, step: Step) -> String {
    state.config.callback_url(&format!(
        "/voice/{}/{}",
        department.as_segment(),
        step.segment(department)
    ))
}

/// Render a flow action as response markup, emitting the department summary
/// on the terminal steps that complete a record synchronously.
async fn respond(
    state: &AppState,
    call_sid: &str,
    department: Department,
    action: NextAction,
    session: &CallSession,
) -> VoiceResponse {
    match action {
        NextAction::Collect {
            step,
            input,
            num_digits,
            prompt,
        } => VoiceResponse::new().gather(Gather {
            input,
            action: step_url(state, department, step),
            prompt: prompt.to_string(),
            num_digits,
            timeout_secs: GATHER_TIMEOUT_SECS,
        }),
        NextAction::RecordDetail { prompt } => VoiceResponse::new().say(prompt).record(Record {
            action: step_url(state, department, Step::Detail),
            max_length_secs: RECORD_MAX_SECS,
            play_beep: true,
            transcribe_callback: Some(state.config.callback_url("/voice/transcription")),
        }),
        NextAction::Close {
            statement,
            emit_summary,
        } => {
            if emit_summary {
                info!("Call {}: {} record complete", call_sid, department.as_segment());
                state
                    .summaries
                    .emit(LeadSummary::from_session(department, session))
                    .await;
            }
            VoiceResponse::new().say(statement).hangup()
        }
    }
}
