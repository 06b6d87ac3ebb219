//! Conversation transcript types
//!
//! A transcript is an append-only, ordered list of messages. Insertion order
//! is the dialogue order sent to the provider.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fallback assistant reply when the model produced no content
pub const APOLOGY_REPLY: &str =
    "I apologize, but I'm having trouble responding right now. Please try again.";

/// Assistant reply used whenever a turn fails
pub const TECHNICAL_DIFFICULTY_REPLY: &str =
    "I'm sorry, I'm experiencing technical difficulties. Please try again later.";

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

/// A single transcript entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp,
        }
    }

    pub fn user(content: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self::new(Role::User, content, timestamp)
    }

    pub fn assistant(content: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self::new(Role::Assistant, content, timestamp)
    }

    pub fn system(content: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self::new(Role::System, content, timestamp)
    }

    /// Whether the message is shown in the transcript view
    pub fn is_visible(&self) -> bool {
        self.role != Role::System
    }
}

/// Ordered, append-only message log
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Replace every entry at once (language selection)
    pub fn reset(&mut self, messages: Vec<Message>) {
        self.messages = messages;
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Messages rendered to the user; system entries are hidden
    pub fn visible(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter().filter(|m| m.is_visible())
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }
}
