// src/state.rs
use std::sync::Arc;

use crate::config::ChatConfig;
use crate::services::providers::{self, ChatProvider, ProviderError};

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: ChatConfig,
    pub provider: Arc<dyn ChatProvider>,
}

impl AppState {
    pub fn new(config: ChatConfig, provider: Arc<dyn ChatProvider>) -> Self {
        Self { config, provider }
    }

    /// State backed by the real provider client selected in `config`.
    pub fn from_config(config: ChatConfig) -> Result<Self, ProviderError> {
        let provider = providers::build(&config)?;
        Ok(Self::new(config, provider))
    }

    pub fn shared(self) -> SharedState {
        Arc::new(self)
    }
}
