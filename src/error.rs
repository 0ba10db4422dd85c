use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;
use tracing::error;

use crate::twiml::VoiceResponse;

/// Errors surfaced by the webhook handlers and configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The platform posted a payload without a call identifier.
    #[error("webhook payload is missing CallSid")]
    MissingCallSid,

    #[error("unknown department segment: {0}")]
    UnknownDepartment(String),

    #[error("unknown step segment: {0}")]
    UnknownStep(String),

    #[error("call not found: {0}")]
    CallNotFound(String),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("webhook error: {}", self);

        match self {
            // The platform treats a non-2xx reply as a dead call, so voice
            // endpoints answer 200 with a terminal statement instead.
            AppError::MissingCallSid
            | AppError::UnknownDepartment(_)
            | AppError::UnknownStep(_) => VoiceResponse::new()
                .say("We're sorry, something went wrong with this call. Please call back and try again.")
                .hangup()
                .into_response(),
            AppError::CallNotFound(call_sid) => (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: format!("Call {} not found", call_sid),
                }),
            )
                .into_response(),
            AppError::Config(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse { error: msg }),
            )
                .into_response(),
        }
    }
}
