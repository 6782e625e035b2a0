//! Abstractions for talking to a remote text-completion service.
//!
//! The `llm` crate defines the [`CompletionClient`] trait along with the
//! HTTP implementation [`OpenAIClient`] and an in-memory
//! [`MockCompletionClient`] for tests.

pub mod client;
pub mod mock;
pub mod traits;

pub use client::{OpenAIClient, DEFAULT_COMPLETIONS_URL};
pub use mock::MockCompletionClient;
pub use traits::{CompletionClient, CompletionParams, LLMError, HUMAN_STOP};
