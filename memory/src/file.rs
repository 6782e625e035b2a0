//! File-backed table of conversation attributes.
//!
//! All users share one JSON document mapping user id to the persisted
//! attribute map. Writes go to a sibling temp file that is renamed over the
//! table so a crash mid-write never leaves a truncated table behind.

use crate::{ConversationStore, StoreError};
use async_trait::async_trait;
use log::{debug, info};
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use voice::ConversationState;

type Table = BTreeMap<String, ConversationState>;

pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Store the table `{table}.json` under `root`, inside a `region`
    /// subdirectory when one is given.
    pub fn new(root: impl AsRef<Path>, region: Option<&str>, table: &str) -> Self {
        let mut path = root.as_ref().to_path_buf();
        if let Some(region) = region {
            path.push(region);
        }
        path.push(format!("{table}.json"));
        info!("persisting conversations to {}", path.display());
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_table(&self) -> Result<Table, StoreError> {
        match fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Table::new()),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl ConversationStore for JsonFileStore {
    async fn load(&self, user_id: &str) -> Result<Option<ConversationState>, StoreError> {
        let mut table = self.read_table().await?;
        Ok(table.remove(user_id))
    }

    async fn save(&self, user_id: &str, state: &ConversationState) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut table = self.read_table().await?;
        table.insert(user_id.to_string(), state.clone());

        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).await?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(&table)?).await?;
        fs::rename(&tmp, &self.path).await?;
        debug!("saved conversation for {user_id}");
        Ok(())
    }
}
