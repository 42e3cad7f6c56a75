#![allow(dead_code)]

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use chat_relay::config::{ChatConfig, ProviderKind};
use chat_relay::services::providers::{ChatProvider, CompletionRequest, FailureKind, ProviderError};

pub enum StubBehavior {
    Reply(String),
    Fail(FailureKind),
    Hang,
    Panic,
    PanicOnLabel,
}

/// Provider double that records every call.
pub struct StubProvider {
    behavior: StubBehavior,
    calls: AtomicUsize,
    last_request: Mutex<Option<CompletionRequest>>,
}

impl StubProvider {
    pub fn new(behavior: StubBehavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        })
    }

    pub fn replying(text: &str) -> Arc<Self> {
        Self::new(StubBehavior::Reply(text.to_string()))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatProvider for StubProvider {
    fn label(&self) -> String {
        if let StubBehavior::PanicOnLabel = self.behavior {
            panic!("stub label exploded");
        }
        "Stub model".to_string()
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());

        match &self.behavior {
            StubBehavior::Reply(text) => Ok(text.clone()),
            StubBehavior::Fail(FailureKind::Authentication) => {
                Err(ProviderError::Authentication("Incorrect API key provided".into()))
            }
            StubBehavior::Fail(FailureKind::RateLimit) => {
                Err(ProviderError::RateLimited("Rate limit reached".into()))
            }
            StubBehavior::Fail(FailureKind::Transient) => Err(ProviderError::EmptyCompletion),
            StubBehavior::Hang => {
                std::future::pending::<()>().await;
                unreachable!()
            }
            StubBehavior::Panic => panic!("stub provider exploded"),
            StubBehavior::PanicOnLabel => Ok("unlabelled".to_string()),
        }
    }
}

pub fn configured(provider: ProviderKind) -> ChatConfig {
    ChatConfig::new(provider, Some("test-key-123".to_string()))
}

pub fn unconfigured(provider: ProviderKind) -> ChatConfig {
    ChatConfig::new(provider, None)
}
