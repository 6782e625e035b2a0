use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stop sequence that keeps the model from writing the next human turn.
pub const HUMAN_STOP: &str = "\nHuman:";

#[derive(Debug, Error)]
pub enum LLMError {
    #[error("network error: {0}")]
    Network(String),
    #[error("completion service returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("completion response contained no choices")]
    NoChoices,
}

impl From<reqwest::Error> for LLMError {
    fn from(err: reqwest::Error) -> Self {
        LLMError::Network(err.to_string())
    }
}

/// Sampling parameters sent with every completion request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompletionParams {
    pub temperature: f32,
    pub max_tokens: u32,
    pub stop: String,
}

impl Default for CompletionParams {
    fn default() -> Self {
        Self {
            temperature: 0.9,
            max_tokens: 150,
            stop: HUMAN_STOP.to_string(),
        }
    }
}

/// A text-completion backend.
///
/// Implementations return the first candidate with surrounding whitespace
/// removed.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &str, params: &CompletionParams) -> Result<String, LLMError>;
}
