// src/services/chatbot.rs

use std::{sync::Arc, time::Duration};

use tracing::{debug, info, warn};

use crate::config::{ChatConfig, ProviderKind};
use crate::message::ChatResponse;
use crate::services::fallback::{FALLBACK_LABEL, transient_reply};
use crate::services::providers::{ChatProvider, CompletionRequest, FailureKind, ProviderError};

pub const SYSTEM_PROMPT: &str = "You are a helpful AI assistant.";
pub const MAX_TOKENS: u32 = 500;
pub const OPENAI_TEMPERATURE: f32 = 0.7;

pub const MESSAGE_REQUIRED: &str = "Message is required.";
pub const RATE_LIMITED: &str =
    "The AI service is receiving too many requests. Please wait a moment and try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Answered,
    InputRejected,
    NotConfigured,
    ProviderFailed(FailureKind),
}

#[derive(Debug, Clone)]
pub struct Resolution {
    pub outcome: Outcome,
    pub response: ChatResponse,
}

impl Resolution {
    fn new(outcome: Outcome, response: ChatResponse) -> Self {
        Self { outcome, response }
    }
}

/// The request sent upstream for `message` under `config`.
pub fn completion_request(message: &str, config: &ChatConfig) -> CompletionRequest {
    CompletionRequest {
        system_prompt: SYSTEM_PROMPT.to_string(),
        user_message: message.to_string(),
        max_tokens: MAX_TOKENS,
        temperature: match config.provider {
            ProviderKind::OpenAi => Some(OPENAI_TEMPERATURE),
            ProviderKind::Gemini => None,
        },
    }
}

pub fn not_configured_message(provider: ProviderKind) -> String {
    format!(
        "Please add {} to your environment to enable AI responses.",
        provider.key_var()
    )
}

pub fn invalid_key_message(provider: ProviderKind) -> String {
    format!(
        "Invalid API key. Please check that {} is set to a valid key.",
        provider.key_var()
    )
}

/// Resolve one chat message. Never fails: every path yields a response.
pub async fn resolve(
    message: Option<&str>,
    config: &ChatConfig,
    provider: Arc<dyn ChatProvider>,
) -> Resolution {
    let Some(message) = message.map(str::trim).filter(|m| !m.is_empty()) else {
        debug!("rejecting empty chat message");
        return Resolution::new(Outcome::InputRejected, ChatResponse::failed(MESSAGE_REQUIRED));
    };

    if config.usable_api_key().is_none() {
        warn!(provider = %config.provider, "API key not configured, skipping provider call");
        let response = ChatResponse::failed(not_configured_message(config.provider))
            .with_note(config.provider.key_source());
        return Resolution::new(Outcome::NotConfigured, response);
    }

    let request = completion_request(message, config);

    match call_provider(provider, request, config.timeout).await {
        Ok((text, label)) => {
            info!(provider = %label, chars = text.len(), "provider answered");
            Resolution::new(Outcome::Answered, ChatResponse::answered(text, label))
        }
        Err(err) => {
            let kind = err.kind();
            warn!(provider = %config.provider, error = %err, ?kind, "provider call failed");
            Resolution::new(
                Outcome::ProviderFailed(kind),
                failure_response(kind, message, config.provider),
            )
        }
    }
}

fn failure_response(kind: FailureKind, message: &str, provider: ProviderKind) -> ChatResponse {
    match kind {
        FailureKind::Authentication => {
            ChatResponse::failed(invalid_key_message(provider)).with_note(provider.key_source())
        }
        FailureKind::RateLimit => ChatResponse::failed(RATE_LIMITED),
        FailureKind::Transient => {
            ChatResponse::failed(transient_reply(message)).with_ai(FALLBACK_LABEL)
        }
    }
}

/// Run every provider call on its own task, bounded by `limit`. Returns the
/// completion text and the provider label.
async fn call_provider(
    provider: Arc<dyn ChatProvider>,
    request: CompletionRequest,
    limit: Duration,
) -> Result<(String, String), ProviderError> {
    let mut task = tokio::spawn(async move {
        let label = provider.label();
        let text = provider.complete(&request).await?;
        Ok::<_, ProviderError>((text, label))
    });

    match tokio::time::timeout(limit, &mut task).await {
        Ok(Ok(result)) => result,
        Ok(Err(join_err)) => Err(ProviderError::Aborted(join_err.to_string())),
        Err(_) => {
            task.abort();
            Err(ProviderError::Timeout(limit))
        }
    }
}
