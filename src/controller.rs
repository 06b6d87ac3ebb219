//! Conversation controller
//!
//! Owns the transcript, the selected language and the input buffer, and is
//! the only writer of the transcript. Every user action goes through the pure
//! [`transition`] function; the controller executes the resulting effects.
//!
//! A turn is split in two so callers that run the request elsewhere (the
//! terminal widget spawns it) still go through the in-flight guard:
//! [`ConversationController::submit_message`] hands back the request to send,
//! [`ConversationController::complete_request`] records its outcome.

use crate::api::{ChatRequest, ChatResponse};
use crate::client::{ChatTransport, TransportError};
use crate::conversation::{
    transition, ConvContext, ConvState, Effect, Event, LanguageSwitchPolicy, Phase,
    TransitionError,
};
use crate::language::Language;
use crate::transcript::{Message, Transcript};
use chrono::Utc;

/// Client-side conversation state for one session
#[derive(Debug, Default)]
pub struct ConversationController {
    state: ConvState,
    context: ConvContext,
    transcript: Transcript,
    input: String,
    scroll_requested: bool,
}

impl ConversationController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: LanguageSwitchPolicy) -> Self {
        Self {
            context: ConvContext::new(policy),
            ..Self::default()
        }
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn language(&self) -> Option<&'static Language> {
        self.state.language
    }

    pub fn is_awaiting_reply(&self) -> bool {
        self.state.awaiting_reply
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Messages to render; system entries stay in the transcript but are
    /// never shown
    pub fn visible_messages(&self) -> impl Iterator<Item = &Message> {
        self.transcript.visible()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn input_mut(&mut self) -> &mut String {
        &mut self.input
    }

    /// Whether the view should jump to the newest message. Reading clears it.
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.scroll_requested)
    }

    /// Choose a language and seed the transcript. Never touches the network.
    pub fn select_language(&mut self, language: &'static Language) {
        let event = Event::LanguageSelected {
            language,
            at: Utc::now(),
        };
        if let Err(e) = self.dispatch(event) {
            tracing::warn!(error = %e, "Language selection refused");
        }
        tracing::info!(language = language.code, "Language selected");
    }

    /// Show the selector again; language and transcript are kept
    pub fn change_language(&mut self) {
        if let Err(e) = self.dispatch(Event::ChangeLanguageRequested) {
            tracing::debug!(error = %e, "Change language ignored");
        }
    }

    /// Start a turn.
    ///
    /// Returns the request to send, or `None` when the message is blank, a
    /// request is already in flight, or no language is active. An accepted
    /// message clears the input buffer.
    pub fn submit_message(&mut self, text: &str) -> Option<ChatRequest> {
        let event = Event::UserSubmitted {
            text: text.to_string(),
            at: Utc::now(),
        };
        match self.dispatch(event) {
            Ok(request) => {
                self.input.clear();
                request
            }
            Err(e) => {
                tracing::debug!(error = %e, "Message not submitted");
                None
            }
        }
    }

    /// Submit whatever is in the input buffer
    pub fn submit_input(&mut self) -> Option<ChatRequest> {
        let text = self.input.clone();
        self.submit_message(&text)
    }

    /// Finish the outstanding turn. Always clears the in-flight flag.
    pub fn complete_request(&mut self, result: Result<ChatResponse, TransportError>) {
        let at = Utc::now();
        let event = match result {
            Ok(response) => Event::ReplyReceived {
                reply: response.reply,
                at,
            },
            Err(e) => {
                tracing::error!(error = %e, "Chat error");
                Event::RequestFailed {
                    error: e.to_string(),
                    at,
                }
            }
        };

        if let Err(e) = self.dispatch(event) {
            tracing::warn!(error = %e, "Dropped response without a pending request");
        }
    }

    /// Run a whole turn against `transport`.
    ///
    /// Returns `false` if the message was not submitted.
    pub async fn send_message<T>(&mut self, transport: &T, text: &str) -> bool
    where
        T: ChatTransport + ?Sized,
    {
        let Some(request) = self.submit_message(text) else {
            return false;
        };
        let result = transport.send(&request).await;
        self.complete_request(result);
        true
    }

    /// Run the transition and execute its effects; returns the request to
    /// send, if any
    fn dispatch(&mut self, event: Event) -> Result<Option<ChatRequest>, TransitionError> {
        let result = transition(&self.state, &self.context, &self.transcript, event)?;
        self.state = result.new_state;

        let mut outbound = None;
        for effect in result.effects {
            match effect {
                Effect::ResetTranscript { messages } => self.transcript.reset(messages),
                Effect::AppendMessage { message } => self.transcript.push(message),
                Effect::SendChat { request } => outbound = Some(request),
                Effect::ScrollToLatest => self.scroll_requested = true,
            }
        }
        Ok(outbound)
    }
}
