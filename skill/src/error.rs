use llm::LLMError;
use memory::StoreError;
use thiserror::Error;

/// Anything that can sink a turn. The manager answers all of them with the
/// same spoken apology.
#[derive(Debug, Error)]
pub enum SkillError {
    #[error("completion failed: {0}")]
    Completion(#[from] LLMError),
    #[error("storage failed: {0}")]
    Storage(#[from] StoreError),
    #[error("converse request carried no utterance")]
    MissingUtterance,
}

/// Convenience result type used throughout this crate.
pub type Result<T> = std::result::Result<T, SkillError>;
