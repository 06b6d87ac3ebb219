//! Conversation state types

use crate::language::{Language, DEFAULT_LANGUAGE_CODE};

/// Which screen the widget is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    SelectingLanguage,
    Chatting,
}

/// What happens to the transcript when a language is chosen mid-conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LanguageSwitchPolicy {
    /// Overwrite the transcript with a fresh directive and greeting
    #[default]
    Reset,
    /// Keep the history and append the new directive and greeting
    Preserve,
}

/// Controller state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvState {
    pub phase: Phase,
    /// Survives a trip back to the selector until a new choice is made
    pub language: Option<&'static Language>,
    /// Set while a proxy request is outstanding; at most one at a time
    pub awaiting_reply: bool,
}

impl Default for ConvState {
    fn default() -> Self {
        Self {
            phase: Phase::SelectingLanguage,
            language: None,
            awaiting_reply: false,
        }
    }
}

impl ConvState {
    /// Code sent on the wire; English when nothing was ever chosen
    pub fn language_code(&self) -> &'static str {
        self.language.map_or(DEFAULT_LANGUAGE_CODE, |l| l.code)
    }
}

/// Immutable settings consulted by transitions
#[derive(Debug, Clone, Copy, Default)]
pub struct ConvContext {
    pub switch_policy: LanguageSwitchPolicy,
}

impl ConvContext {
    pub fn new(switch_policy: LanguageSwitchPolicy) -> Self {
        Self { switch_policy }
    }
}
