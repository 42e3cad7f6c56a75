// src/services/providers/mod.rs

pub mod gemini;
pub mod openai;

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::config::{ChatConfig, ProviderKind};

pub use gemini::GeminiProvider;
pub use openai::OpenAiProvider;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system_prompt: String,
    pub user_message: String,
    pub max_tokens: u32,
    pub temperature: Option<f32>,
}

/// How a failed call is reported to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Authentication,
    RateLimit,
    Transient,
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Provider rejected the API key: {0}")]
    Authentication(String),

    #[error("Provider rate limit hit: {0}")]
    RateLimited(String),

    #[error("Provider returned {status}: {body}")]
    Upstream { status: StatusCode, body: String },

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to decode provider response: {0}")]
    Decode(String),

    #[error("Provider returned no completion")]
    EmptyCompletion,

    #[error("Provider did not answer within {0:?}")]
    Timeout(Duration),

    #[error("Provider call aborted: {0}")]
    Aborted(String),
}

impl ProviderError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ProviderError::Authentication(_) => FailureKind::Authentication,
            ProviderError::RateLimited(_) => FailureKind::RateLimit,
            _ => FailureKind::Transient,
        }
    }

    /// Map a non-success HTTP status to an error.
    ///
    /// Gemini answers an invalid key with 400 rather than 401, so the body is
    /// inspected for its key-error markers too.
    pub fn from_status(status: StatusCode, body: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ProviderError::Authentication(body),
            StatusCode::TOO_MANY_REQUESTS => ProviderError::RateLimited(body),
            StatusCode::BAD_REQUEST
                if body.contains("API_KEY_INVALID") || body.contains("API key not valid") =>
            {
                ProviderError::Authentication(body)
            }
            _ => ProviderError::Upstream { status, body },
        }
    }
}

#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Human readable label, e.g. `OpenAI gpt-3.5-turbo`.
    fn label(&self) -> String;

    /// Submit one completion and return the first completion's text.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, ProviderError>;
}

/// Build the provider selected by `config`.
pub fn build(config: &ChatConfig) -> Result<Arc<dyn ChatProvider>, ProviderError> {
    let client = Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .build()?;

    let api_key = config.usable_api_key().unwrap_or_default().to_string();

    let provider: Arc<dyn ChatProvider> = match config.provider {
        ProviderKind::OpenAi => Arc::new(OpenAiProvider::new(
            client,
            &config.base_url,
            api_key,
            &config.model,
        )),
        ProviderKind::Gemini => Arc::new(GeminiProvider::new(
            client,
            &config.base_url,
            api_key,
            &config.model,
        )),
    };
    Ok(provider)
}

pub(crate) async fn error_from_response(response: reqwest::Response) -> ProviderError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    ProviderError::from_status(status, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_classification() {
        assert_eq!(
            ProviderError::from_status(StatusCode::UNAUTHORIZED, String::new()).kind(),
            FailureKind::Authentication
        );
        assert_eq!(
            ProviderError::from_status(StatusCode::FORBIDDEN, String::new()).kind(),
            FailureKind::Authentication
        );
        assert_eq!(
            ProviderError::from_status(StatusCode::TOO_MANY_REQUESTS, String::new()).kind(),
            FailureKind::RateLimit
        );
        assert_eq!(
            ProviderError::from_status(
                StatusCode::BAD_REQUEST,
                r#"{"error":{"status":"INVALID_ARGUMENT","details":[{"reason":"API_KEY_INVALID"}]}}"#
                    .into()
            )
            .kind(),
            FailureKind::Authentication
        );
        assert_eq!(
            ProviderError::from_status(StatusCode::BAD_REQUEST, "bad payload".into()).kind(),
            FailureKind::Transient
        );
        assert_eq!(
            ProviderError::from_status(StatusCode::BAD_GATEWAY, String::new()).kind(),
            FailureKind::Transient
        );
    }

    #[test]
    fn local_failures_are_transient() {
        assert_eq!(ProviderError::EmptyCompletion.kind(), FailureKind::Transient);
        assert_eq!(
            ProviderError::Timeout(Duration::from_secs(1)).kind(),
            FailureKind::Transient
        );
        assert_eq!(
            ProviderError::Decode("eof".into()).kind(),
            FailureKind::Transient
        );
    }

    #[test]
    fn build_picks_configured_vendor() {
        let openai = build(&ChatConfig::new(ProviderKind::OpenAi, Some("k".into()))).unwrap();
        assert_eq!(openai.label(), "OpenAI gpt-3.5-turbo");

        let gemini = build(&ChatConfig::new(ProviderKind::Gemini, None)).unwrap();
        assert_eq!(gemini.label(), "Google Gemini gemini-1.5-flash-latest");
    }
}
