// src/message.rs
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub success: bool,
    pub response: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub timestamp: String,
}

impl ChatResponse {
    pub fn answered(response: impl Into<String>, ai: impl Into<String>) -> Self {
        Self {
            success: true,
            response: response.into(),
            ai: Some(ai.into()),
            note: None,
            timestamp: timestamp(),
        }
    }

    pub fn failed(response: impl Into<String>) -> Self {
        Self {
            success: false,
            response: response.into(),
            ai: None,
            note: None,
            timestamp: timestamp(),
        }
    }

    pub fn with_ai(mut self, ai: impl Into<String>) -> Self {
        self.ai = Some(ai.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Current UTC time as RFC 3339 with millisecond precision.
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
