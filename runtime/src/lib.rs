//! Process wiring for the voice skill: storage selection and the HTTP front.

use log::warn;
use memory::{ConversationStore, InMemoryStore, JsonFileStore};
use skill::SkillConfig;
use std::path::Path;
use std::sync::Arc;

pub mod server;

/// Pick the conversation store. With a data directory, conversations are
/// kept in the configured table on disk; without one they live only as long
/// as the process.
pub fn store_from_args(
    data_dir: Option<&Path>,
    config: &SkillConfig,
) -> Arc<dyn ConversationStore> {
    match data_dir {
        Some(dir) => Arc::new(JsonFileStore::new(
            dir,
            config.storage_region.as_deref(),
            &config.storage_table,
        )),
        None => {
            warn!("no data directory given, conversations will not survive a restart");
            Arc::new(InMemoryStore::new())
        }
    }
}
