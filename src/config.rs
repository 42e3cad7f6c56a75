// src/config.rs

use std::{env, fmt, str::FromStr, time::Duration};

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Values people commonly leave in `.env` templates.
const PLACEHOLDER_KEYS: &[&str] = &[
    "your_api_key_here",
    "your-api-key-here",
    "your_api_key",
    "your-api-key",
    "your_openai_api_key_here",
    "your-openai-api-key",
    "your_gemini_api_key_here",
    "your-gemini-api-key",
    "sk-...",
    "sk-xxx",
    "changeme",
    "placeholder",
];

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid PORT '{0}'")]
    InvalidPort(String),

    #[error("Unknown CHAT_PROVIDER '{0}' (expected 'openai' or 'gemini')")]
    UnknownProvider(String),

    #[error("Invalid CHAT_TIMEOUT_SECS '{0}'")]
    InvalidTimeout(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    OpenAi,
    Gemini,
}

impl ProviderKind {
    pub fn key_var(self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "OPENAI_API_KEY",
            ProviderKind::Gemini => "GEMINI_API_KEY",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "OpenAI",
            ProviderKind::Gemini => "Google Gemini",
        }
    }

    /// Where an operator gets a key for this provider.
    pub fn key_source(self) -> &'static str {
        match self {
            ProviderKind::OpenAi => {
                "Get an API key from the OpenAI dashboard: https://platform.openai.com/api-keys"
            }
            ProviderKind::Gemini => {
                "Get a FREE key from Google AI Studio: https://aistudio.google.com/app/apikey"
            }
        }
    }

    pub fn default_model(self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "gpt-3.5-turbo",
            ProviderKind::Gemini => "gemini-1.5-flash-latest",
        }
    }

    pub fn default_base_url(self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "https://api.openai.com/v1",
            ProviderKind::Gemini => "https://generativelanguage.googleapis.com/v1beta",
        }
    }

    fn model_var(self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "OPENAI_MODEL",
            ProviderKind::Gemini => "GEMINI_MODEL",
        }
    }

    fn base_url_var(self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "OPENAI_BASE_URL",
            ProviderKind::Gemini => "GEMINI_BASE_URL",
        }
    }
}

impl FromStr for ProviderKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(ProviderKind::OpenAi),
            "gemini" | "google" => Ok(ProviderKind::Gemini),
            _ => Err(ConfigError::UnknownProvider(s.to_string())),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::OpenAi => write!(f, "openai"),
            ProviderKind::Gemini => write!(f, "gemini"),
        }
    }
}

/// Settings the chat resolver and provider clients need.
#[derive(Clone)]
pub struct ChatConfig {
    pub provider: ProviderKind,
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

// Keeps the key out of logs.
impl fmt::Debug for ChatConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatConfig")
            .field("provider", &self.provider)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ChatConfig {
    /// Config for `provider` with its defaults and the given key.
    pub fn new(provider: ProviderKind, api_key: Option<String>) -> Self {
        Self {
            provider,
            api_key,
            model: provider.default_model().to_string(),
            base_url: provider.default_base_url().to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// The API key, unless it is missing, blank or a template placeholder.
    pub fn usable_api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !is_placeholder_key(key))
    }
}

pub fn is_placeholder_key(key: &str) -> bool {
    let key = key.trim();
    if key.is_empty() {
        return true;
    }
    let lower = key.to_ascii_lowercase();
    PLACEHOLDER_KEYS.contains(&lower.as_str())
        || (lower.starts_with('<') && lower.ends_with('>'))
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub chat: ChatConfig,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from any variable source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let port = match get("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
            None => DEFAULT_PORT,
        };

        let provider = match get("CHAT_PROVIDER") {
            Some(raw) => raw.parse::<ProviderKind>()?,
            None if get("OPENAI_API_KEY")
                .filter(|key| !is_placeholder_key(key))
                .is_some() =>
            {
                ProviderKind::OpenAi
            }
            None => ProviderKind::Gemini,
        };

        let timeout = match get("CHAT_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => return Err(ConfigError::InvalidTimeout(raw.clone())),
            },
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let chat = ChatConfig {
            provider,
            api_key: get(provider.key_var()).map(|k| k.trim().to_string()),
            model: get(provider.model_var()).unwrap_or_else(|| provider.default_model().to_string()),
            base_url: get(provider.base_url_var())
                .unwrap_or_else(|| provider.default_base_url().to_string()),
            timeout,
        };

        Ok(Self { port, chat })
    }
}
