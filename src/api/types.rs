//! API request and response types
//!
//! Shared by the proxy handlers and the widget's HTTP transport.

use crate::language::Language;
use crate::transcript::{Message, Role};
use serde::{Deserialize, Deserializer, Serialize};

/// Message as it travels on the wire: role and content only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireMessage {
    pub role: Role,
    pub content: String,
}

impl From<&Message> for WireMessage {
    fn from(message: &Message) -> Self {
        Self {
            role: message.role,
            content: message.content.clone(),
        }
    }
}

/// Request body of `POST /api/chat`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<WireMessage>,
    pub language: String,
}

/// Successful response of `POST /api/chat`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Missing or null on the wire decodes as empty; callers substitute a
    /// fallback
    #[serde(default, deserialize_with = "null_as_empty")]
    pub reply: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call: Option<bool>,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl ChatResponse {
    pub fn reply(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            tool_call: None,
        }
    }
}

/// Failure response of `POST /api/chat`
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub reply: String,
    pub error: String,
}

/// Response for `GET /api/languages`
#[derive(Debug, Serialize)]
pub struct LanguagesResponse {
    pub languages: &'static [Language],
}
