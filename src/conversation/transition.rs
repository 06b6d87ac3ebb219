//! Pure state transition function
//!
//! Given the same state, transcript and event this always produces the same
//! result; the controller applies the returned effects.

use super::{ConvContext, ConvState, Effect, Event, LanguageSwitchPolicy, Phase};
use crate::api::{ChatRequest, WireMessage};
use crate::language::Language;
use crate::transcript::{Message, Transcript, APOLOGY_REPLY, TECHNICAL_DIFFICULTY_REPLY};
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: ConvState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: ConvState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_effects(mut self, effects: impl IntoIterator<Item = Effect>) -> Self {
        self.effects.extend(effects);
        self
    }
}

/// Events the current state refuses. A refused event leaves state and
/// transcript untouched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Message is empty")]
    EmptyMessage,
    #[error("A request is already in flight")]
    RequestInFlight,
    #[error("No language has been selected")]
    NoLanguage,
    #[error("Invalid transition: {0}")]
    InvalidTransition(&'static str),
}

/// Pure transition function
pub fn transition(
    state: &ConvState,
    context: &ConvContext,
    transcript: &Transcript,
    event: Event,
) -> Result<TransitionResult, TransitionError> {
    match event {
        Event::LanguageSelected { language, at } => {
            let new_state = ConvState {
                phase: Phase::Chatting,
                language: Some(language),
                awaiting_reply: state.awaiting_reply,
            };
            let seed = seed_messages(language, at);

            let result = TransitionResult::new(new_state);
            let result = match context.switch_policy {
                LanguageSwitchPolicy::Preserve if !transcript.is_empty() => {
                    result.with_effects(seed.into_iter().map(Effect::append))
                }
                _ => result.with_effect(Effect::ResetTranscript { messages: seed }),
            };
            Ok(result.with_effect(Effect::ScrollToLatest))
        }

        Event::ChangeLanguageRequested => match state.phase {
            Phase::Chatting => Ok(TransitionResult::new(ConvState {
                phase: Phase::SelectingLanguage,
                ..*state
            })),
            Phase::SelectingLanguage => Err(TransitionError::InvalidTransition(
                "language selector is already shown",
            )),
        },

        Event::UserSubmitted { text, at } => {
            if text.trim().is_empty() {
                return Err(TransitionError::EmptyMessage);
            }
            if state.awaiting_reply {
                return Err(TransitionError::RequestInFlight);
            }
            if state.phase == Phase::SelectingLanguage {
                return Err(TransitionError::NoLanguage);
            }

            let user_message = Message::user(text, at);
            let request = ChatRequest {
                messages: transcript
                    .messages()
                    .iter()
                    .chain(std::iter::once(&user_message))
                    .map(WireMessage::from)
                    .collect(),
                language: state.language_code().to_string(),
            };

            Ok(TransitionResult::new(ConvState {
                awaiting_reply: true,
                ..*state
            })
            .with_effect(Effect::append(user_message))
            .with_effect(Effect::SendChat { request })
            .with_effect(Effect::ScrollToLatest))
        }

        Event::ReplyReceived { reply, at } => {
            let content = if reply.is_empty() {
                APOLOGY_REPLY.to_string()
            } else {
                reply
            };
            finish_turn(state, Message::assistant(content, at))
        }

        Event::RequestFailed { error: _, at } => {
            finish_turn(state, Message::assistant(TECHNICAL_DIFFICULTY_REPLY, at))
        }
    }
}

/// Directive and greeting that open every conversation
fn seed_messages(language: &Language, at: DateTime<Utc>) -> Vec<Message> {
    vec![
        Message::system(language.system_directive(), at),
        Message::assistant(language.greeting_text, at),
    ]
}

/// Close the outstanding request with an assistant message
fn finish_turn(state: &ConvState, message: Message) -> Result<TransitionResult, TransitionError> {
    if !state.awaiting_reply {
        return Err(TransitionError::InvalidTransition("no request in flight"));
    }

    Ok(TransitionResult::new(ConvState {
        awaiting_reply: false,
        ..*state
    })
    .with_effect(Effect::append(message))
    .with_effect(Effect::ScrollToLatest))
}
