//! Requests the skill understands.
//!
//! The platform names intents with strings; [`Intent::from_platform`] folds
//! those into a closed enum so the manager's dispatch is an exhaustive match.

use std::collections::HashMap;
use std::fmt;

pub const CONVERSE_INTENT: &str = "UserCommandIntent";
pub const UTTERANCE_SLOT: &str = "UserCommand";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    /// Forward the utterance to the completion service.
    Converse { utterance: Option<String> },
    ClearContext,
    RepeatLast,
    Help,
    /// Cancel or stop; both end the session.
    Stop,
    Fallback,
    /// An intent name the skill has no handler for.
    Unhandled(String),
}

impl Intent {
    /// Map a platform intent name and its slot values onto an [`Intent`].
    pub fn from_platform(name: &str, slots: &HashMap<String, String>) -> Self {
        match name {
            CONVERSE_INTENT => Intent::Converse {
                utterance: slots.get(UTTERANCE_SLOT).cloned(),
            },
            "ClearContextIntent" => Intent::ClearContext,
            "SayAgainIntent" => Intent::RepeatLast,
            "AMAZON.HelpIntent" => Intent::Help,
            "AMAZON.CancelIntent" | "AMAZON.StopIntent" => Intent::Stop,
            "AMAZON.FallbackIntent" => Intent::Fallback,
            other => Intent::Unhandled(other.to_string()),
        }
    }
}

/// One turn as delivered by the platform.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SkillRequest {
    Launch,
    Intent(Intent),
    SessionEnded { reason: Option<String> },
}

impl fmt::Display for SkillRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkillRequest::Launch => write!(f, "launch"),
            SkillRequest::SessionEnded { .. } => write!(f, "session-ended"),
            SkillRequest::Intent(intent) => match intent {
                Intent::Converse { .. } => write!(f, "converse"),
                Intent::ClearContext => write!(f, "clear-context"),
                Intent::RepeatLast => write!(f, "repeat-last"),
                Intent::Help => write!(f, "help"),
                Intent::Stop => write!(f, "stop"),
                Intent::Fallback => write!(f, "fallback"),
                Intent::Unhandled(name) => write!(f, "unhandled({name})"),
            },
        }
    }
}
