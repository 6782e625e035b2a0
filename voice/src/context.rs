//! Prompt composition for the completion service.

use crate::conversation::{ConversationState, AI_PREFIX};

/// Join the transcript into a prompt that invites the next `AI: ` line.
pub fn compose_prompt(state: &ConversationState) -> String {
    format!("{}\n{}", state.transcript().join("\n"), AI_PREFIX)
}
