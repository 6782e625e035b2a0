//! Rolling transcript shared with the completion service.
//!
//! A [`ConversationState`] is the prompt: a fixed preamble followed by
//! alternating `Human: ` and `AI: ` lines. It serializes to the attribute
//! map the skill persists between sessions (`gpt_context`, `user_response`,
//! `gpt_response`).

use log::{debug, warn};
use serde::{Deserialize, Serialize};

pub const PREAMBLE: &str = "The following is a conversation with an AI assistant through a voice interface. The assistant is helpful, creative, clever, and very friendly.";
/// Stored in place of the last input and reply before the first exchange.
pub const PLACEHOLDER: &str = "Nothing";
pub const HUMAN_PREFIX: &str = "Human: ";
pub const AI_PREFIX: &str = "AI: ";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationState {
    #[serde(rename = "gpt_context")]
    transcript: Vec<String>,
    #[serde(rename = "user_response")]
    last_user_utterance: String,
    #[serde(rename = "gpt_response")]
    last_assistant_reply: String,
}

impl Default for ConversationState {
    fn default() -> Self {
        Self {
            transcript: vec![PREAMBLE.to_string()],
            last_user_utterance: PLACEHOLDER.to_string(),
            last_assistant_reply: PLACEHOLDER.to_string(),
        }
    }
}

impl ConversationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    pub fn last_user_utterance(&self) -> &str {
        &self.last_user_utterance
    }

    pub fn last_assistant_reply(&self) -> &str {
        &self.last_assistant_reply
    }

    /// Append the user's line and remember it as the last input.
    pub fn push_user(&mut self, utterance: &str) {
        self.last_user_utterance = utterance.to_string();
        self.transcript.push(format!("{HUMAN_PREFIX}{utterance}"));
    }

    /// Append the assistant's line and remember it for repeats.
    pub fn push_reply(&mut self, reply: &str) {
        self.last_assistant_reply = reply.to_string();
        self.transcript.push(format!("{AI_PREFIX}{reply}"));
    }

    /// Drop the oldest exchange after the preamble when the transcript is
    /// longer than `max_len`. Returns `true` if anything was removed.
    ///
    /// Removal is positional: the two lines following the preamble go,
    /// whatever they are. A pair that is not `Human:` then `AI:` is logged
    /// but still removed.
    ///
    /// Callers check the budget after the user's line and before the reply,
    /// so an even `max_len` leaves `max_len + 1` lines once the reply lands.
    pub fn trim_to(&mut self, max_len: usize) -> bool {
        if self.transcript.len() <= max_len {
            return false;
        }
        let removed: Vec<String> = (0..2)
            .filter_map(|_| {
                if self.transcript.len() > 1 {
                    Some(self.transcript.remove(1))
                } else {
                    None
                }
            })
            .collect();
        let paired = removed.len() == 2
            && removed[0].starts_with(HUMAN_PREFIX)
            && removed[1].starts_with(AI_PREFIX);
        if !paired {
            warn!("trimmed transcript lines were not a Human/AI pair: {removed:?}");
        }
        debug!(
            "trimmed {} lines, transcript now {} lines",
            removed.len(),
            self.transcript.len()
        );
        !removed.is_empty()
    }

    /// Restore the preamble if a stored transcript arrived empty.
    /// Returns `true` when the state had to be reset.
    pub fn ensure_preamble(&mut self) -> bool {
        if self.transcript.is_empty() {
            warn!("stored transcript was empty, resetting conversation");
            *self = Self::default();
            return true;
        }
        false
    }
}
