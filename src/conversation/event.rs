//! Events that can occur in a conversation

use crate::language::Language;
use chrono::{DateTime, Utc};

/// Events that trigger state transitions
#[derive(Debug, Clone)]
pub enum Event {
    // User events
    LanguageSelected {
        language: &'static Language,
        at: DateTime<Utc>,
    },
    /// Re-show the selector without touching language or transcript
    ChangeLanguageRequested,
    UserSubmitted {
        text: String,
        at: DateTime<Utc>,
    },

    // Proxy events
    ReplyReceived {
        reply: String,
        at: DateTime<Utc>,
    },
    RequestFailed {
        error: String,
        at: DateTime<Utc>,
    },
}
