//! Skill configuration assembled once at start-up.
//!
//! Every tunable the skill reads lives on [`SkillConfig`]. It is built from
//! environment variables by [`SkillConfig::from_env`] and then shared
//! read-only with the [`ContextManager`](crate::ContextManager).

use llm::{CompletionParams, LLMError, OpenAIClient, DEFAULT_COMPLETIONS_URL, HUMAN_STOP};
use std::time::Duration;
use thiserror::Error;

/// Smallest transcript budget that still leaves room for the preamble and
/// one full exchange after trimming.
pub const MIN_CONTEXT_SIZE: usize = 3;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} environment variable is not set")]
    Missing(&'static str),
    #[error("{name} has invalid value {value:?}")]
    Invalid { name: &'static str, value: String },
    #[error("max context size must be at least {MIN_CONTEXT_SIZE}, got {0}")]
    ContextTooSmall(usize),
}

#[derive(Clone, Debug, PartialEq)]
pub struct SkillConfig {
    pub api_key: String,
    pub organization: Option<String>,
    pub api_url: String,
    pub voice: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub max_context_size: usize,
    pub request_timeout: Option<Duration>,
    pub storage_region: Option<String>,
    pub storage_table: String,
}

impl SkillConfig {
    /// Configuration with the stock defaults and the given credential.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            organization: None,
            api_url: DEFAULT_COMPLETIONS_URL.to_string(),
            voice: "Matthew".to_string(),
            temperature: 0.9,
            max_tokens: 150,
            max_context_size: 50,
            request_timeout: None,
            storage_region: None,
            storage_table: "conversations".to_string(),
        }
    }

    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to
    /// its value. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = get("OPENAI_API_KEY").ok_or(ConfigError::Missing("OPENAI_API_KEY"))?;
        let mut config = Self::new(api_key);
        config.organization = get("OPENAI_ORGANIZATION");
        if let Some(url) = get("OPENAI_URL") {
            config.api_url = url;
        }
        if let Some(voice) = get("SKILL_VOICE") {
            config.voice = voice;
        }
        if let Some(v) = get("OPENAI_TEMPERATURE") {
            config.temperature = parse("OPENAI_TEMPERATURE", &v)?;
        }
        if let Some(v) = get("OPENAI_MAX_TOKENS") {
            config.max_tokens = parse("OPENAI_MAX_TOKENS", &v)?;
        }
        if let Some(v) = get("MAX_CONTEXT_SIZE") {
            config.max_context_size = parse("MAX_CONTEXT_SIZE", &v)?;
        }
        if let Some(v) = get("COMPLETION_TIMEOUT_SECS") {
            let secs: u64 = parse("COMPLETION_TIMEOUT_SECS", &v)?;
            config.request_timeout = Some(Duration::from_secs(secs));
        }
        config.storage_region = get("PERSISTENCE_REGION");
        if let Some(table) = get("PERSISTENCE_TABLE_NAME") {
            config.storage_table = table;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_context_size < MIN_CONTEXT_SIZE {
            return Err(ConfigError::ContextTooSmall(self.max_context_size));
        }
        if !self.temperature.is_finite() || self.temperature < 0.0 {
            return Err(ConfigError::Invalid {
                name: "OPENAI_TEMPERATURE",
                value: self.temperature.to_string(),
            });
        }
        Ok(())
    }

    pub fn completion_params(&self) -> CompletionParams {
        CompletionParams {
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            stop: HUMAN_STOP.to_string(),
        }
    }

    /// Build the HTTP completion client described by this configuration.
    pub fn completion_client(&self) -> Result<OpenAIClient, LLMError> {
        let client = OpenAIClient::new(&self.api_url, &self.api_key)
            .with_organization(self.organization.clone());
        match self.request_timeout {
            Some(timeout) => client.with_timeout(timeout),
            None => Ok(client),
        }
    }
}

fn parse<T: std::str::FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        name,
        value: value.to_string(),
    })
}
