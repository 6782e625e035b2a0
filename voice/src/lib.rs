//! Conversation state and speech rendering for the voice skill.
//!
//! [`ConversationState`] holds the transcript that doubles as the completion
//! prompt; [`compose_prompt`] turns it into request text and [`Voice`] wraps
//! replies in SSML for the platform to speak.

pub mod context;
pub mod conversation;
pub mod speech;

pub use context::compose_prompt;
pub use conversation::{ConversationState, AI_PREFIX, HUMAN_PREFIX, PLACEHOLDER, PREAMBLE};
pub use speech::Voice;
