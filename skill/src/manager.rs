//! Turn handling for the skill.
//!
//! [`ContextManager::handle`] runs one turn from start to finish: it loads
//! the user's [`ConversationState`], dispatches on the request, saves any
//! change and renders the spoken response. Failures never escape a turn;
//! they are logged and answered with an apology while the stored state is
//! left as it was.

use crate::config::SkillConfig;
use crate::error::{Result, SkillError};
use crate::intent::{Intent, SkillRequest};
use crate::response::SkillResponse;
use llm::{CompletionClient, CompletionParams};
use log::{debug, error, info, warn};
use memory::ConversationStore;
use std::sync::Arc;
use voice::{compose_prompt, ConversationState, Voice};

pub const INTRO_SPEECH: &str = "Welcome to the GPT-3 Interface.";
pub const LAUNCH_REPROMPT: &str = "Try saying 'body' followed by anything.";
pub const HELP_SPEECH: &str = "Say, 'body', to create the body of a message to send to GPT-3. Other commands include 'clear context' and 'say again?'";
pub const HELP_REPROMPT: &str = "Body. Clear context. Say again?";
pub const CONVERSE_REPROMPT: &str = "Reprompt for User Command.";
pub const CLEAR_PREFIX: &str = "Context cleared... ";
pub const CLEAR_REPROMPT: &str = "Say 'body' to start your message to GPT-3.";
pub const FAREWELL_SPEECH: &str = "Connection, closed!";
pub const FALLBACK_SPEECH: &str = "Fallback Intent. Say 'help' for help.";
pub const FALLBACK_REPROMPT: &str = "Say 'help' for help.";
pub const UNHANDLED_SPEECH: &str = "Unhandled intent.";
pub const APOLOGY_SPEECH: &str = "Sorry, there was an exception.";

pub struct ContextManager {
    config: Arc<SkillConfig>,
    params: CompletionParams,
    voice: Voice,
    llm: Arc<dyn CompletionClient>,
    store: Arc<dyn ConversationStore>,
}

impl ContextManager {
    pub fn new(
        config: Arc<SkillConfig>,
        llm: Arc<dyn CompletionClient>,
        store: Arc<dyn ConversationStore>,
    ) -> Self {
        Self {
            params: config.completion_params(),
            voice: Voice::new(&config.voice),
            config,
            llm,
            store,
        }
    }

    pub fn config(&self) -> &SkillConfig {
        &self.config
    }

    /// Handle one turn for `user_id`.
    pub async fn handle(&self, user_id: &str, request: SkillRequest) -> SkillResponse {
        info!("{request} request from {user_id}");
        let response = match self.dispatch(user_id, request).await {
            Ok(response) => response,
            Err(e) => {
                error!("turn for {user_id} failed: {e}");
                SkillResponse::speak(APOLOGY_SPEECH).ask(APOLOGY_SPEECH)
            }
        };
        info!("Response: {response}");
        response
    }

    async fn dispatch(&self, user_id: &str, request: SkillRequest) -> Result<SkillResponse> {
        match request {
            SkillRequest::Launch => self.launch(user_id).await,
            SkillRequest::SessionEnded { reason } => {
                info!(
                    "Session ended with reason: {}",
                    reason.as_deref().unwrap_or("unknown")
                );
                Ok(SkillResponse::empty())
            }
            SkillRequest::Intent(intent) => match intent {
                Intent::Converse { utterance } => self.converse(user_id, utterance).await,
                Intent::ClearContext => self.clear(user_id).await,
                Intent::RepeatLast => self.repeat(user_id).await,
                Intent::Help => Ok(SkillResponse::speak(HELP_SPEECH).ask(HELP_REPROMPT)),
                Intent::Stop => Ok(SkillResponse::speak(FAREWELL_SPEECH).end_session()),
                Intent::Fallback => {
                    Ok(SkillResponse::speak(FALLBACK_SPEECH).ask(FALLBACK_REPROMPT))
                }
                Intent::Unhandled(name) => {
                    warn!("no handler for intent {name}");
                    Ok(SkillResponse::speak(UNHANDLED_SPEECH).ask(UNHANDLED_SPEECH))
                }
            },
        }
    }

    async fn load(&self, user_id: &str) -> Result<Option<ConversationState>> {
        let mut stored = self.store.load(user_id).await?;
        if let Some(state) = stored.as_mut() {
            state.ensure_preamble();
        }
        Ok(stored)
    }

    async fn launch(&self, user_id: &str) -> Result<SkillResponse> {
        match self.load(user_id).await? {
            Some(state) => debug!(
                "resuming conversation for {user_id} with {} lines",
                state.transcript().len()
            ),
            None => {
                info!("starting a fresh conversation for {user_id}");
                self.store.save(user_id, &ConversationState::new()).await?;
            }
        }
        Ok(SkillResponse::speak(self.voice.wrap(INTRO_SPEECH)).ask(LAUNCH_REPROMPT))
    }

    async fn converse(&self, user_id: &str, utterance: Option<String>) -> Result<SkillResponse> {
        let utterance = utterance
            .filter(|u| !u.trim().is_empty())
            .ok_or(SkillError::MissingUtterance)?;
        let mut state = self.load(user_id).await?.unwrap_or_default();

        state.push_user(&utterance);
        state.trim_to(self.config.max_context_size);
        let reply = self.llm.complete(&compose_prompt(&state), &self.params).await?;
        state.push_reply(&reply);
        self.store.save(user_id, &state).await?;

        Ok(SkillResponse::speak(self.voice.wrap(&reply)).ask(CONVERSE_REPROMPT))
    }

    async fn clear(&self, user_id: &str) -> Result<SkillResponse> {
        self.store.save(user_id, &ConversationState::new()).await?;
        let speech = format!("{CLEAR_PREFIX}{}", self.voice.wrap(INTRO_SPEECH));
        Ok(SkillResponse::speak(speech).ask(CLEAR_REPROMPT))
    }

    async fn repeat(&self, user_id: &str) -> Result<SkillResponse> {
        let state = self.load(user_id).await?.unwrap_or_default();
        Ok(
            SkillResponse::speak(self.voice.wrap(state.last_assistant_reply())).ask(format!(
                "You had said... {}",
                state.last_user_utterance()
            )),
        )
    }
}
