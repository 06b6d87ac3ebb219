//! Process configuration
//!
//! Everything is read from the environment once at startup and injected into
//! constructors; nothing below reads the environment on its own.

use crate::llm::{DEFAULT_CHAT_COMPLETIONS_URL, DEFAULT_MODEL};
use std::time::Duration;

/// Provider connection settings
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Provider credential; may be absent, which fails each chat request
    pub api_key: Option<String>,
    /// Full URL of the chat completions endpoint
    pub endpoint: String,
    pub model: String,
    /// Request timeout; `None` leaves the transport default (no timeout)
    pub timeout: Option<Duration>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_CHAT_COMPLETIONS_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: None,
        }
    }
}

impl LlmConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_key: std::env::var("GROQ_API_KEY").ok(),
            endpoint: std::env::var("DWNTWNA_PROVIDER_URL").unwrap_or(defaults.endpoint),
            model: std::env::var("DWNTWNA_MODEL").unwrap_or(defaults.model),
            timeout: std::env::var("DWNTWNA_PROVIDER_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs),
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }
}

/// Completion proxy server settings
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    pub port: u16,
    pub llm: LlmConfig,
}

impl ProxyConfig {
    pub fn from_env() -> Self {
        Self {
            port: std::env::var("DWNTWNA_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            llm: LlmConfig::from_env(),
        }
    }
}

/// Terminal widget settings
#[derive(Debug, Clone)]
pub struct WidgetConfig {
    /// Base URL of the completion proxy, without the `/api/chat` path
    pub proxy_url: String,
    /// Log destination; the terminal belongs to the UI so logging is off
    /// unless this is set
    pub log_file: Option<String>,
}

impl WidgetConfig {
    pub fn from_env() -> Self {
        Self {
            proxy_url: std::env::var("DWNTWNA_PROXY_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:8000".to_string()),
            log_file: std::env::var("DWNTWNA_LOG_FILE").ok(),
        }
    }
}
