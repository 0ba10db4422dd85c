// Integration tests for the recording / transcription decoupling
//
// Service issue descriptions and after-hours messages are captured as voice
// recordings; the transcribed text arrives later on an independent callback.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use roofline_ivr::config::{Config, MenuConfig, MenuFallback, ServiceConfig, SessionConfig, WebhookConfig};
use roofline_ivr::summary::{LeadSummary, SummarySink};
use roofline_ivr::{create_router, AppState};
use tokio::sync::Mutex;
use tower::ServiceExt;
use uuid::Uuid;

#[derive(Default)]
struct CapturingSink {
    summaries: Mutex<Vec<LeadSummary>>,
}

#[async_trait]
impl SummarySink for CapturingSink {
    async fn emit(&self, summary: LeadSummary) {
        self.summaries.lock().await.push(summary);
    }
}

fn test_app() -> (axum::Router, Arc<CapturingSink>) {
    let sink = Arc::new(CapturingSink::default());
    let config = Config {
        service: ServiceConfig::default(),
        webhook: WebhookConfig {
            public_base_url: "https://ivr.test".to_string(),
        },
        menu: MenuConfig {
            fallback: MenuFallback::Billing,
        },
        session: SessionConfig::default(),
    };
    let state = AppState::new(config).with_summary_sink(sink.clone());
    (create_router(state), sink)
}

fn new_call_sid() -> String {
    format!("CA{}", Uuid::new_v4().simple())
}

async fn post_form(app: &axum::Router, path: &str, body: String) -> (StatusCode, String) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(path)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn get_session(app: &axum::Router, call: &str) -> serde_json::Value {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/calls/{}", call))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_service_phone_step_answers_record_markup() {
    let (app, _) = test_app();
    let call = new_call_sid();

    post_form(&app, "/voice/menu", format!("CallSid={}&Digits=2", call)).await;
    let (_, body) = post_form(
        &app,
        "/voice/service/phone",
        format!("CallSid={}&Digits=5551234567", call),
    )
    .await;

    assert!(body.contains("<Record"));
    assert!(body.contains("action=\"https://ivr.test/voice/service/issue\""));
    assert!(body.contains("transcribe=\"true\""));
    assert!(body.contains("transcribeCallback=\"https://ivr.test/voice/transcription\""));
    assert!(body.contains("playBeep=\"true\""));
}

#[tokio::test]
async fn test_service_recording_then_transcription() {
    let (app, sink) = test_app();
    let call = new_call_sid();

    post_form(&app, "/voice/menu", format!("CallSid={}&Digits=2", call)).await;
    post_form(
        &app,
        "/voice/service/name",
        format!("CallSid={}&SpeechResult=Jane%20Doe", call),
    )
    .await;
    post_form(
        &app,
        "/voice/service/phone",
        format!("CallSid={}&Digits=5551234567", call),
    )
    .await;

    // The recording reference arrives; the caller hears the closing statement
    // without waiting for transcription.
    let (status, body) = post_form(
        &app,
        "/voice/service/issue",
        format!("CallSid={}&RecordingSid=REC1", call),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<Hangup/>"));
    assert!(!body.contains("<Gather"));

    // No summary yet; the record completes when the transcription lands
    assert_eq!(sink.summaries.lock().await.len(), 0);

    let (status, _) = post_form(
        &app,
        "/voice/transcription",
        format!(
            "CallSid={}&RecordingSid=REC1&TranscriptionText=active%20leak%2C%20ceiling%20sagging",
            call
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let session = get_session(&app, &call).await;
    assert_eq!(session["detail"], "active leak, ceiling sagging");
    assert_eq!(session["priority"], "urgent");

    let summaries = sink.summaries.lock().await;
    assert_eq!(summaries.len(), 1);
    assert!(summaries[0]
        .line
        .starts_with("SERVICE|Jane Doe|5551234567||active leak, ceiling sagging|urgent|"));
}

#[tokio::test]
async fn test_duplicate_transcription_is_a_noop() {
    let (app, sink) = test_app();
    let call = new_call_sid();

    post_form(&app, "/voice/menu", format!("CallSid={}&Digits=2", call)).await;
    post_form(
        &app,
        "/voice/service/issue",
        format!("CallSid={}&RecordingSid=REC1", call),
    )
    .await;

    let body = format!(
        "CallSid={}&RecordingSid=REC1&TranscriptionText=active%20leak", call
    );
    let (status, _) = post_form(&app, "/voice/transcription", body.clone()).await;
    assert_eq!(status, StatusCode::OK);

    // The mapping was consumed; a replayed callback changes nothing
    let (status, _) = post_form(&app, "/voice/transcription", body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(sink.summaries.lock().await.len(), 1);
}

#[tokio::test]
async fn test_transcription_for_unknown_recording_is_acknowledged() {
    let (app, sink) = test_app();

    let (status, _) = post_form(
        &app,
        "/voice/transcription",
        "CallSid=CA1&RecordingSid=REC404&TranscriptionText=hello".to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(sink.summaries.lock().await.len(), 0);
}

#[tokio::test]
async fn test_after_hours_message_flow() {
    let (app, sink) = test_app();
    let call = new_call_sid();

    // The recording action callback for the after-hours message
    let (_, body) = post_form(
        &app,
        "/voice/afterhours/message",
        format!("CallSid={}&RecordingSid=REC9", call),
    )
    .await;
    assert!(body.contains("<Hangup/>"));

    post_form(
        &app,
        "/voice/transcription",
        format!(
            "CallSid={}&RecordingSid=REC9&TranscriptionText=please%20call%20me%20back%20tomorrow",
            call
        ),
    )
    .await;

    let session = get_session(&app, &call).await;
    assert_eq!(session["department"], "afterhours");
    assert_eq!(session["detail"], "please call me back tomorrow");
    assert_eq!(session["priority"], "normal");

    let summaries = sink.summaries.lock().await;
    assert_eq!(summaries.len(), 1);
    assert!(summaries[0]
        .line
        .starts_with("AFTERHOURS|please call me back tomorrow|normal|"));
}

#[tokio::test]
async fn test_urgent_after_hours_message_is_classified() {
    let (app, sink) = test_app();
    let call = new_call_sid();

    post_form(
        &app,
        "/voice/afterhours/message",
        format!("CallSid={}&RecordingSid=REC10", call),
    )
    .await;
    post_form(
        &app,
        "/voice/transcription",
        format!(
            "CallSid={}&RecordingSid=REC10&TranscriptionText=STORM%20DAMAGE%20half%20the%20roof%20is%20gone",
            call
        ),
    )
    .await;

    let session = get_session(&app, &call).await;
    assert_eq!(session["priority"], "urgent");

    let summaries = sink.summaries.lock().await;
    assert!(summaries[0].line.contains("|urgent|"));
}

#[tokio::test]
async fn test_recording_step_without_recording_still_closes() {
    let (app, _) = test_app();
    let call = new_call_sid();

    post_form(&app, "/voice/menu", format!("CallSid={}&Digits=2", call)).await;
    let (status, body) = post_form(
        &app,
        "/voice/service/issue",
        format!("CallSid={}", call),
    )
    .await;

    // No usable input: the field stays unset and the flow still closes out
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<Hangup/>"));
}
