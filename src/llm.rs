//! LLM provider abstraction
//!
//! The proxy talks to the model through [`LlmService`]; the only production
//! implementation is the OpenAI-compatible chat completions client.

mod error;
mod openai;
mod types;

pub use error::{LlmError, LlmErrorKind};
pub use openai::{OpenAIService, DEFAULT_CHAT_COMPLETIONS_URL, DEFAULT_MODEL};
pub use types::*;

use async_trait::async_trait;
use std::sync::Arc;

/// Common interface for LLM providers
#[async_trait]
pub trait LlmService: Send + Sync {
    /// Make a completion request
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError>;

    /// Get the model ID
    fn model_id(&self) -> &str;
}

#[async_trait]
impl<T: LlmService + ?Sized> LlmService for Arc<T> {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        (**self).complete(request).await
    }

    fn model_id(&self) -> &str {
        (**self).model_id()
    }
}

/// Wraps a provider and records timing, token usage and failures for each
/// completion. The proxy holds one of these in production.
pub struct LoggingService {
    inner: Arc<dyn LlmService>,
    model_id: String,
}

impl LoggingService {
    pub fn new(inner: Arc<dyn LlmService>) -> Self {
        let model_id = inner.model_id().to_string();
        Self { inner, model_id }
    }
}

#[async_trait]
impl LlmService for LoggingService {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        let history = request.messages.len();
        tracing::debug!(model = %self.model_id, history, "Calling provider");

        let started = std::time::Instant::now();
        let result = self.inner.complete(request).await;
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        match &result {
            Ok(response) => tracing::info!(
                model = %self.model_id,
                elapsed_ms,
                history,
                prompt_tokens = response.usage.input_tokens,
                completion_tokens = response.usage.output_tokens,
                has_reply = response.reply().is_some(),
                "Provider replied"
            ),
            Err(e) => tracing::error!(
                model = %self.model_id,
                elapsed_ms,
                kind = ?e.kind,
                error = %e.message,
                "Provider call failed"
            ),
        }

        result
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}
