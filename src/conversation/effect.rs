//! Effects produced by state transitions

use crate::api::ChatRequest;
use crate::transcript::Message;

/// Effects to be executed after state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Replace the whole transcript
    ResetTranscript { messages: Vec<Message> },

    /// Append one message to the transcript
    AppendMessage { message: Message },

    /// Send the request to the completion proxy
    SendChat { request: ChatRequest },

    /// Bring the newest message into view
    ScrollToLatest,
}

impl Effect {
    pub fn append(message: Message) -> Self {
        Effect::AppendMessage { message }
    }
}
