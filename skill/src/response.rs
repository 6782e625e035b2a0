use std::fmt;

/// What the platform should say back, built the way the platform's own
/// response builder is: `speak(..).ask(..)`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SkillResponse {
    pub speech: Option<String>,
    pub reprompt: Option<String>,
    pub end_session: bool,
}

impl SkillResponse {
    /// A response with nothing to say.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn speak(speech: impl Into<String>) -> Self {
        Self {
            speech: Some(speech.into()),
            ..Self::default()
        }
    }

    /// Keep the session open and say `reprompt` if the user goes quiet.
    pub fn ask(mut self, reprompt: impl Into<String>) -> Self {
        self.reprompt = Some(reprompt.into());
        self
    }

    pub fn end_session(mut self) -> Self {
        self.end_session = true;
        self
    }
}

impl fmt::Display for SkillResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "speech={:?} reprompt={:?} end_session={}",
            self.speech, self.reprompt, self.end_session
        )
    }
}
