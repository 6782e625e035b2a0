//! The conversational skill: configuration, request types and the
//! [`ContextManager`] that runs each turn.
//!
//! A turn flows from a [`SkillRequest`] through [`ContextManager::handle`]
//! to a [`SkillResponse`]. The manager talks to a completion service through
//! [`llm::CompletionClient`] and to storage through
//! [`memory::ConversationStore`], both injected at construction.

pub mod config;
pub mod error;
pub mod intent;
pub mod manager;
pub mod response;

pub use config::{ConfigError, SkillConfig};
pub use error::SkillError;
pub use intent::{Intent, SkillRequest};
pub use manager::ContextManager;
pub use response::SkillResponse;
