//! Task collection repository over a key-value store.
//!
//! # Invariants
//! - Stored shape is a JSON array of `Task` in collection order.
//! - Reads never reorder or filter what was written.

use crate::config::DEFAULT_STORAGE_KEY;
use crate::model::task::Task;
use crate::repo::kv_store::{KeyValueStore, StorageError, StorageResult};

/// Load/save contract for the whole task collection.
pub trait TaskRepository {
    fn load(&self) -> StorageResult<Vec<Task>>;
    fn save(&self, tasks: &[Task]) -> StorageResult<()>;
}

/// `TaskRepository` serializing to one key of a `KeyValueStore`.
pub struct KvTaskRepository<S: KeyValueStore> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> KvTaskRepository<S> {
    /// Uses the default namespace key.
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: KeyValueStore> TaskRepository for KvTaskRepository<S> {
    fn load(&self) -> StorageResult<Vec<Task>> {
        let Some(raw) = self.store.get(&self.key)? else {
            return Ok(Vec::new());
        };
        serde_json::from_str(&raw).map_err(|err| StorageError::CorruptData {
            key: self.key.clone(),
            message: err.to_string(),
        })
    }

    fn save(&self, tasks: &[Task]) -> StorageResult<()> {
        let raw = serde_json::to_string(tasks)?;
        self.store.put(&self.key, &raw)
    }
}
