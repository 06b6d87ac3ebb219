//! Conversation controller state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions: the
//! transition function never touches the transcript or the network, it only
//! describes what the controller should do next.

mod effect;
pub mod event;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
pub use event::Event;
pub use state::{ConvContext, ConvState, LanguageSwitchPolicy, Phase};
pub use transition::{transition, TransitionError, TransitionResult};
