//! Transport from the widget to the completion proxy

use crate::api::{ChatRequest, ChatResponse};
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use thiserror::Error;

/// Why a chat request produced no usable response
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Network error: {0}")]
    Network(String),
    /// Non-2xx status; the body is not inspected
    #[error("Chat API error: {0}")]
    Status(u16),
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

/// One request/response round trip to the proxy
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, TransportError>;
}

#[async_trait]
impl<T: ChatTransport + ?Sized> ChatTransport for Arc<T> {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, TransportError> {
        (**self).send(request).await
    }
}

/// HTTP transport posting JSON to `{base_url}/api/chat`
pub struct HttpChatTransport {
    client: Client,
    endpoint: String,
}

impl HttpChatTransport {
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        let client = Client::builder()
            .build()
            .map_err(|e| TransportError::Network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: format!("{}/api/chat", base_url.trim_end_matches('/')),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ChatTransport for HttpChatTransport {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, TransportError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }

        response
            .json::<ChatResponse>()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))
    }
}
