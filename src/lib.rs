//! Dwntwna AI Concierge
//!
//! A language-selectable travel chat widget and the completion proxy it talks
//! to. The widget side ([`controller`], [`conversation`], [`client`],
//! [`widget`]) owns the transcript; the proxy side ([`api`], [`proxy`],
//! [`llm`]) injects the concierge prompt and forwards to the LLM provider.

pub mod api;
pub mod client;
pub mod config;
pub mod controller;
pub mod conversation;
pub mod language;
pub mod llm;
pub mod proxy;
pub mod system_prompt;
pub mod transcript;
pub mod widget;

#[cfg(test)]
mod testing;
