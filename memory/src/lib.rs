//! Persistence port for conversation state.
//!
//! The skill never reaches into storage directly: it is handed a
//! [`ConversationStore`] and calls [`load`](ConversationStore::load) at the
//! start of a turn and [`save`](ConversationStore::save) after a mutation.
//! [`InMemoryStore`] backs tests and throwaway runs; [`JsonFileStore`] keeps
//! every user's attributes in one JSON table on disk.

use async_trait::async_trait;
use thiserror::Error;
use voice::ConversationState;

pub mod file;
pub mod in_memory;

pub use file::JsonFileStore;
pub use in_memory::InMemoryStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored attributes are malformed: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Key-value storage of [`ConversationState`] keyed by user id.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Fetch the state saved for `user_id`, or `None` on first use.
    async fn load(&self, user_id: &str) -> Result<Option<ConversationState>, StoreError>;

    /// Replace the state saved for `user_id`.
    async fn save(&self, user_id: &str, state: &ConversationState) -> Result<(), StoreError>;
}
