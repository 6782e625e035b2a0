//! In-memory [`CompletionClient`] used in tests across the workspace.

use crate::traits::{CompletionClient, CompletionParams, LLMError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Replies with queued responses in order and records every prompt it sees.
///
/// An exhausted queue answers with [`LLMError::NoChoices`], which lets tests
/// exercise the failure path by queueing nothing.
#[derive(Default)]
pub struct MockCompletionClient {
    responses: Mutex<VecDeque<Result<String, LLMError>>>,
    prompts: Mutex<Vec<String>>,
}

impl MockCompletionClient {
    pub fn new(responses: Vec<String>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().map(Ok).collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Queue a failure to be returned by the next call.
    pub fn push_error(&self, err: LLMError) {
        self.responses.lock().unwrap().push_back(Err(err));
    }

    pub fn push_response(&self, text: impl Into<String>) {
        self.responses.lock().unwrap().push_back(Ok(text.into()));
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionClient for MockCompletionClient {
    async fn complete(&self, prompt: &str, _params: &CompletionParams) -> Result<String, LLMError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        let next = self.responses.lock().unwrap().pop_front();
        match next {
            Some(Ok(text)) => Ok(text.trim().to_string()),
            Some(Err(e)) => Err(e),
            None => Err(LLMError::NoChoices),
        }
    }
}
