//! Property-based tests for the conversation state machine
//!
//! These tests verify key invariants hold across arbitrary event sequences.

use super::*;
use crate::api::WireMessage;
use crate::language::Language;
use crate::transcript::{Role, Transcript, APOLOGY_REPLY, TECHNICAL_DIFFICULTY_REPLY};
use chrono::Utc;
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_language() -> impl Strategy<Value = &'static Language> {
    (0..Language::all().len()).prop_map(|i| &Language::all()[i])
}

fn arb_policy() -> impl Strategy<Value = LanguageSwitchPolicy> {
    prop_oneof![
        Just(LanguageSwitchPolicy::Reset),
        Just(LanguageSwitchPolicy::Preserve),
    ]
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        arb_language().prop_map(|language| Event::LanguageSelected {
            language,
            at: Utc::now(),
        }),
        Just(Event::ChangeLanguageRequested),
        // Includes blank and whitespace-only input
        "[a-z ]{0,12}".prop_map(|text| Event::UserSubmitted {
            text,
            at: Utc::now(),
        }),
        "[a-zA-Z ]{0,12}".prop_map(|reply| Event::ReplyReceived {
            reply,
            at: Utc::now(),
        }),
        "[a-z]{1,8}".prop_map(|error| Event::RequestFailed {
            error,
            at: Utc::now(),
        }),
    ]
}

/// Minimal effect executor mirroring the controller
fn apply(transcript: &mut Transcript, effects: &[Effect]) -> Vec<crate::api::ChatRequest> {
    let mut sent = Vec::new();
    for effect in effects {
        match effect {
            Effect::ResetTranscript { messages } => transcript.reset(messages.clone()),
            Effect::AppendMessage { message } => transcript.push(message.clone()),
            Effect::SendChat { request } => sent.push(request.clone()),
            Effect::ScrollToLatest => {}
        }
    }
    sent
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    // At most one request is ever outstanding
    #[test]
    fn prop_single_request_in_flight(
        policy in arb_policy(),
        events in proptest::collection::vec(arb_event(), 0..30),
    ) {
        let ctx = ConvContext::new(policy);
        let mut state = ConvState::default();
        let mut transcript = Transcript::new();
        let mut outstanding = 0i32;

        for event in events {
            if let Ok(result) = transition(&state, &ctx, &transcript, event) {
                let sent = apply(&mut transcript, &result.effects);
                let finished = result
                    .effects
                    .iter()
                    .any(|e| match e {
                        Effect::AppendMessage { message } => message.role == Role::Assistant,
                        _ => false,
                    })
                    && state.awaiting_reply
                    && !result.new_state.awaiting_reply;

                outstanding += i32::try_from(sent.len()).unwrap();
                if finished {
                    outstanding -= 1;
                }
                state = result.new_state;
            }
            prop_assert!(outstanding <= 1);
            prop_assert_eq!(outstanding == 1, state.awaiting_reply);
        }
    }

    // Refused events change nothing
    #[test]
    fn prop_rejected_events_are_noops(
        events in proptest::collection::vec(arb_event(), 0..30),
    ) {
        let ctx = ConvContext::default();
        let mut state = ConvState::default();
        let mut transcript = Transcript::new();

        for event in events {
            let before_state = state;
            let before_len = transcript.len();
            match transition(&state, &ctx, &transcript, event) {
                Ok(result) => {
                    apply(&mut transcript, &result.effects);
                    state = result.new_state;
                }
                Err(_) => {
                    prop_assert_eq!(state, before_state);
                    prop_assert_eq!(transcript.len(), before_len);
                }
            }
        }
    }

    // Appends never rewrite history; only a reset may shrink the transcript
    #[test]
    fn prop_transcript_is_append_only(
        events in proptest::collection::vec(arb_event(), 0..30),
    ) {
        let ctx = ConvContext::new(LanguageSwitchPolicy::Preserve);
        let mut state = ConvState::default();
        let mut transcript = Transcript::new();

        for event in events {
            if let Ok(result) = transition(&state, &ctx, &transcript, event) {
                let resets = result
                    .effects
                    .iter()
                    .any(|e| matches!(e, Effect::ResetTranscript { .. }));
                let before = transcript.clone();
                apply(&mut transcript, &result.effects);
                if !resets {
                    prop_assert!(transcript.messages().starts_with(before.messages()));
                }
                state = result.new_state;
            }
        }
    }

    // Outbound requests carry the transcript including the new user message
    #[test]
    fn prop_request_mirrors_transcript(
        events in proptest::collection::vec(arb_event(), 0..30),
    ) {
        let ctx = ConvContext::default();
        let mut state = ConvState::default();
        let mut transcript = Transcript::new();

        for event in events {
            if let Ok(result) = transition(&state, &ctx, &transcript, event) {
                let sent = apply(&mut transcript, &result.effects);
                for request in sent {
                    let expected: Vec<WireMessage> =
                        transcript.messages().iter().map(WireMessage::from).collect();
                    prop_assert_eq!(&request.messages, &expected);
                    prop_assert_eq!(request.messages.last().map(|m| m.role), Some(Role::User));
                    prop_assert_eq!(request.language.as_str(), result.new_state.language_code());
                }
                state = result.new_state;
            }
        }
    }

    // Reset policy: selecting a language always yields directive + greeting
    #[test]
    fn prop_selection_resets_to_two_entries(
        events in proptest::collection::vec(arb_event(), 0..20),
        language in arb_language(),
    ) {
        let ctx = ConvContext::default();
        let mut state = ConvState::default();
        let mut transcript = Transcript::new();

        for event in events {
            if let Ok(result) = transition(&state, &ctx, &transcript, event) {
                apply(&mut transcript, &result.effects);
                state = result.new_state;
            }
        }

        let result = transition(
            &state,
            &ctx,
            &transcript,
            Event::LanguageSelected { language, at: Utc::now() },
        ).unwrap();
        apply(&mut transcript, &result.effects);

        prop_assert_eq!(transcript.len(), 2);
        prop_assert_eq!(transcript.messages()[0].role, Role::System);
        prop_assert!(transcript.messages()[0].content.contains(language.display_name));
        prop_assert_eq!(transcript.messages()[1].content.as_str(), language.greeting_text);
    }

    // Every finished turn appends exactly one non-empty assistant message
    #[test]
    fn prop_finished_turn_appends_one_reply(reply in "[a-zA-Z ]{0,12}", fail in any::<bool>()) {
        let ctx = ConvContext::default();
        let state = ConvState {
            phase: Phase::Chatting,
            language: Language::from_code("en"),
            awaiting_reply: true,
        };
        let event = if fail {
            Event::RequestFailed { error: "boom".to_string(), at: Utc::now() }
        } else {
            Event::ReplyReceived { reply: reply.clone(), at: Utc::now() }
        };

        let result = transition(&state, &ctx, &Transcript::new(), event).unwrap();
        let appended: Vec<_> = result
            .effects
            .iter()
            .filter_map(|e| match e {
                Effect::AppendMessage { message } => Some(message.content.clone()),
                _ => None,
            })
            .collect();

        prop_assert_eq!(appended.len(), 1);
        let expected = if fail {
            TECHNICAL_DIFFICULTY_REPLY.to_string()
        } else if reply.is_empty() {
            APOLOGY_REPLY.to_string()
        } else {
            reply
        };
        prop_assert_eq!(&appended[0], &expected);
    }
}
