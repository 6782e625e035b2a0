//! HTTP client for an OpenAI-style text-completion endpoint.
//!
//! [`OpenAIClient`] posts `{prompt, temperature, max_tokens, stop}` to a
//! single completions URL and reads back `choices[0].text`. Credentials are
//! sent as basic auth with an empty user name, the way the legacy engines
//! endpoint accepts them.

use crate::traits::{CompletionClient, CompletionParams, LLMError};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_COMPLETIONS_URL: &str =
    "https://api.openai.com/v1/engines/text-davinci-002/completions";

#[derive(Serialize)]
struct CompletionRequest<'a> {
    prompt: &'a str,
    temperature: f32,
    max_tokens: u32,
    stop: &'a str,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    text: String,
}

pub struct OpenAIClient {
    url: String,
    api_key: String,
    organization: Option<String>,
    client: Client,
}

impl OpenAIClient {
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
            organization: None,
            client: Client::new(),
        }
    }

    /// Send an `OpenAI-Organization` header with every request.
    pub fn with_organization(mut self, organization: Option<String>) -> Self {
        self.organization = organization;
        self
    }

    /// Bound each request by `timeout`. Without this the transport default
    /// applies, which never gives up on a stalled connection.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, LLMError> {
        self.client = Client::builder().timeout(timeout).build()?;
        Ok(self)
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl CompletionClient for OpenAIClient {
    async fn complete(&self, prompt: &str, params: &CompletionParams) -> Result<String, LLMError> {
        let body = CompletionRequest {
            prompt,
            temperature: params.temperature,
            max_tokens: params.max_tokens,
            stop: &params.stop,
        };
        let mut req = self
            .client
            .post(&self.url)
            .basic_auth("", Some(&self.api_key))
            .json(&body);
        if let Some(org) = &self.organization {
            req = req.header("OpenAI-Organization", org);
        }
        debug!("posting {} prompt bytes to {}", prompt.len(), self.url);
        let resp = req.send().await?;
        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            return Err(LLMError::Status {
                status: status.as_u16(),
                body: text,
            });
        }
        let parsed: CompletionResponse = serde_json::from_str(&text)
            .map_err(|e| LLMError::InvalidResponse(e.to_string()))?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.text.trim().to_string())
            .ok_or(LLMError::NoChoices)
    }
}
