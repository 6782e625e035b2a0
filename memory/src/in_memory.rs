use crate::{ConversationStore, StoreError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use voice::ConversationState;

#[derive(Default)]
pub struct InMemoryStore {
    states: Mutex<HashMap<String, ConversationState>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of users with saved state.
    pub fn len(&self) -> usize {
        self.states.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ConversationStore for InMemoryStore {
    async fn load(&self, user_id: &str) -> Result<Option<ConversationState>, StoreError> {
        Ok(self.states.lock().unwrap().get(user_id).cloned())
    }

    async fn save(&self, user_id: &str, state: &ConversationState) -> Result<(), StoreError> {
        self.states
            .lock()
            .unwrap()
            .insert(user_id.to_string(), state.clone());
        Ok(())
    }
}
