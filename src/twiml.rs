//! Voice response markup for the telephony platform.
//!
//! Every webhook answers with an XML `<Response>` envelope telling the
//! platform what to say, what input to gather, and where to post the result.

use axum::response::{IntoResponse, Response};

/// Input mode for a gather instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatherInput {
    Digits,
    Speech,
    SpeechAndDigits,
}

impl GatherInput {
    fn as_attr(&self) -> &'static str {
        match self {
            GatherInput::Digits => "dtmf",
            GatherInput::Speech => "speech",
            GatherInput::SpeechAndDigits => "speech dtmf",
        }
    }
}

/// A prompt-and-collect instruction: speak the prompt, collect caller input,
/// post the result to `action`.
#[derive(Debug, Clone)]
pub struct Gather {
    pub input: GatherInput,
    pub action: String,
    pub prompt: String,
    /// Fixed digit count; the platform submits as soon as this many are pressed.
    pub num_digits: Option<u8>,
    pub timeout_secs: u32,
}

/// A record instruction: capture the caller's voice, post the recording
/// reference to `action`, and (optionally) deliver an async transcription.
#[derive(Debug, Clone)]
pub struct Record {
    pub action: String,
    pub max_length_secs: u32,
    pub play_beep: bool,
    /// Transcription callback address; enables async transcription when set.
    pub transcribe_callback: Option<String>,
}

/// Builder for the response envelope.
#[derive(Debug, Default)]
pub struct VoiceResponse {
    elements: Vec<String>,
}

impl VoiceResponse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Speak a statement. Text is entity-escaped.
    pub fn say(mut self, text: &str) -> Self {
        self.elements.push(format!("<Say>{}</Say>", escape_xml(text)));
        self
    }

    pub fn gather(mut self, gather: Gather) -> Self {
        let mut attrs = format!(
            r#"input="{}" action="{}" method="POST" timeout="{}""#,
            gather.input.as_attr(),
            escape_xml(&gather.action),
            gather.timeout_secs,
        );
        if let Some(n) = gather.num_digits {
            attrs.push_str(&format!(r#" numDigits="{}""#, n));
        }
        self.elements.push(format!(
            "<Gather {}><Say>{}</Say></Gather>",
            attrs,
            escape_xml(&gather.prompt)
        ));
        self
    }

    pub fn record(mut self, record: Record) -> Self {
        let mut attrs = format!(
            r#"action="{}" method="POST" maxLength="{}" playBeep="{}""#,
            escape_xml(&record.action),
            record.max_length_secs,
            record.play_beep,
        );
        if let Some(cb) = &record.transcribe_callback {
            attrs.push_str(&format!(
                r#" transcribe="true" transcribeCallback="{}""#,
                escape_xml(cb)
            ));
        }
        self.elements.push(format!("<Record {}/>", attrs));
        self
    }

    /// Send the caller to another address.
    pub fn redirect(mut self, url: &str) -> Self {
        self.elements.push(format!(
            r#"<Redirect method="POST">{}</Redirect>"#,
            escape_xml(url)
        ));
        self
    }

    pub fn pause(mut self, secs: u32) -> Self {
        self.elements.push(format!(r#"<Pause length="{}"/>"#, secs));
        self
    }

    pub fn hangup(mut self) -> Self {
        self.elements.push("<Hangup/>".to_string());
        self
    }

    pub fn build(&self) -> String {
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<Response>{}</Response>",
            self.elements.join("")
        )
    }
}

impl IntoResponse for VoiceResponse {
    fn into_response(self) -> Response {
        ([("Content-Type", "application/xml")], self.build()).into_response()
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
