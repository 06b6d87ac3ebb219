//! Completion proxy
//!
//! Stateless translator between the widget's transcript shape and the
//! provider's chat completions shape. Client-supplied system messages are
//! discarded; the proxy injects its own persona prompt instead.

use crate::api::{ChatRequest, ChatResponse};
use crate::llm::{LlmError, LlmMessage, LlmRequest, LlmService};
use crate::system_prompt::build_system_prompt;
use crate::transcript::{Role, APOLOGY_REPLY};
use std::sync::Arc;
use thiserror::Error;

pub const TEMPERATURE: f32 = 0.7;
pub const MAX_TOKENS: u32 = 1000;

/// Reasons a chat turn could not be completed
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("Malformed request body: {0}")]
    MalformedBody(#[from] serde_json::Error),
    #[error(transparent)]
    Provider(#[from] LlmError),
}

/// Forwards chat transcripts to the model
#[derive(Clone)]
pub struct CompletionProxy {
    llm: Arc<dyn LlmService>,
}

impl CompletionProxy {
    pub fn new(llm: Arc<dyn LlmService>) -> Self {
        Self { llm }
    }

    pub fn model_id(&self) -> &str {
        self.llm.model_id()
    }

    /// Translate a chat request into the provider request.
    ///
    /// System entries are dropped; the persona prompt for the requested
    /// language takes their place.
    pub fn build_request(request: &ChatRequest) -> LlmRequest {
        let messages = request
            .messages
            .iter()
            .filter_map(|m| match m.role {
                Role::User => Some(LlmMessage::user(m.content.clone())),
                Role::Assistant => Some(LlmMessage::assistant(m.content.clone())),
                Role::System => None,
            })
            .collect();

        LlmRequest {
            system: Some(build_system_prompt(&request.language)),
            messages,
            temperature: Some(TEMPERATURE),
            max_tokens: Some(MAX_TOKENS),
        }
    }

    /// Parse a raw request body and complete it
    pub async fn handle_body(&self, body: &[u8]) -> Result<ChatResponse, ProxyError> {
        let request: ChatRequest = serde_json::from_slice(body)?;
        self.complete(&request).await
    }

    pub async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, ProxyError> {
        let llm_request = Self::build_request(request);
        tracing::debug!(
            language = %request.language,
            forwarded = llm_request.messages.len(),
            dropped = request.messages.len() - llm_request.messages.len(),
            "Forwarding chat to provider"
        );

        let response = self.llm.complete(&llm_request).await?;
        let reply = response.reply().unwrap_or(APOLOGY_REPLY);
        Ok(ChatResponse::reply(reply))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::WireMessage;
    use crate::llm::{LlmErrorKind, LlmResponse};
    use crate::testing::MockLlmClient;

    fn wire(role: Role, content: &str) -> WireMessage {
        WireMessage {
            role,
            content: content.to_string(),
        }
    }

    fn proxy_with(mock: &Arc<MockLlmClient>) -> CompletionProxy {
        CompletionProxy::new(mock.clone())
    }

    #[tokio::test]
    async fn test_client_system_message_is_replaced() {
        let mock = Arc::new(MockLlmClient::new("test-model"));
        mock.queue_response(LlmResponse::text("مرحبا"));
        let proxy = proxy_with(&mock);

        let request = ChatRequest {
            messages: vec![wire(Role::System, "ignored"), wire(Role::User, "Hi")],
            language: "ar".to_string(),
        };
        let response = proxy.complete(&request).await.unwrap();
        assert_eq!(response.reply, "مرحبا");

        let sent = mock.recorded_requests();
        assert_eq!(sent.len(), 1);
        let system = sent[0].system.as_deref().unwrap();
        assert!(system.contains("Arabic"));
        assert!(!system.contains("ignored"));
        assert_eq!(sent[0].messages, vec![LlmMessage::user("Hi")]);
        assert!(sent[0].messages.iter().all(|m| m.content != "ignored"));
    }

    #[test]
    fn test_unknown_language_defaults_to_english() {
        let request = ChatRequest {
            messages: vec![wire(Role::User, "Hi")],
            language: "xx".to_string(),
        };
        let llm_request = CompletionProxy::build_request(&request);
        assert!(llm_request
            .system
            .unwrap()
            .contains("Always respond in English."));
    }

    #[test]
    fn test_request_parameters() {
        let request = ChatRequest {
            messages: vec![
                wire(Role::Assistant, "Welcome"),
                wire(Role::User, "Where to eat?"),
            ],
            language: "en".to_string(),
        };
        let llm_request = CompletionProxy::build_request(&request);
        assert_eq!(llm_request.temperature, Some(TEMPERATURE));
        assert_eq!(llm_request.max_tokens, Some(1000));
        // Dialogue order is preserved
        assert_eq!(
            llm_request.messages,
            vec![
                LlmMessage::assistant("Welcome"),
                LlmMessage::user("Where to eat?")
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_completion_becomes_apology() {
        let mock = Arc::new(MockLlmClient::new("test-model"));
        mock.queue_response(LlmResponse::default());
        mock.queue_response(LlmResponse::text(""));
        let proxy = proxy_with(&mock);

        let request = ChatRequest {
            messages: vec![wire(Role::User, "Hi")],
            language: "en".to_string(),
        };
        for _ in 0..2 {
            let response = proxy.complete(&request).await.unwrap();
            assert_eq!(response.reply, APOLOGY_REPLY);
        }
    }

    #[tokio::test]
    async fn test_provider_failure_is_error() {
        let mock = Arc::new(MockLlmClient::new("test-model"));
        mock.queue_error(LlmError::auth("GROQ_API_KEY is not configured"));
        let proxy = proxy_with(&mock);

        let err = proxy
            .handle_body(br#"{"messages":[{"role":"user","content":"Hi"}],"language":"en"}"#)
            .await
            .unwrap_err();
        match err {
            ProxyError::Provider(e) => assert_eq!(e.kind, LlmErrorKind::Auth),
            ProxyError::MalformedBody(_) => panic!("expected provider error"),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_never_reaches_provider() {
        let mock = Arc::new(MockLlmClient::new("test-model"));
        let proxy = proxy_with(&mock);

        let bodies: [&[u8]; 3] = [
            b"not json",
            br#"{"language":"en"}"#,
            br#"{"messages":[{"role":"tool","content":"x"}],"language":"en"}"#,
        ];
        for body in bodies {
            let err = proxy.handle_body(body).await.unwrap_err();
            assert!(matches!(err, ProxyError::MalformedBody(_)));
        }
        assert!(mock.recorded_requests().is_empty());
    }
}
