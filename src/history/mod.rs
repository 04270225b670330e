//! Recent-search history.
//!
//! The last ten lookups are kept newest first and persisted as one JSON array
//! under a single key. A missing or unreadable value loads as an empty list;
//! history problems never block a lookup.

mod store;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::{HISTORY_KEY, MAX_HISTORY_ENTRIES};
use crate::error_handling::StorageError;
use crate::lookup::{LookupResult, LookupSnapshot};

pub use store::{KeyValueStore, MemoryStore, SqliteStore};

/// One remembered lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub target: String,
    pub timestamp: DateTime<Utc>,
    pub data: LookupSnapshot,
}

impl From<&LookupResult> for HistoryEntry {
    fn from(result: &LookupResult) -> Self {
        Self {
            target: result.target.to_string(),
            timestamp: result.completed_at,
            data: result.snapshot(),
        }
    }
}

/// Inserts `entry` at the head and drops anything past the cap.
pub fn push_entry(entries: &mut Vec<HistoryEntry>, entry: HistoryEntry) {
    entries.insert(0, entry);
    entries.truncate(MAX_HISTORY_ENTRIES);
}

/// History list backed by a key-value store.
pub struct HistoryStore {
    store: Arc<dyn KeyValueStore>,
    entries: Vec<HistoryEntry>,
}

impl HistoryStore {
    /// Loads the persisted list.
    ///
    /// Read or parse failures are logged and yield an empty history.
    pub async fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let entries = match store.get(HISTORY_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<HistoryEntry>>(&raw) {
                Ok(mut entries) => {
                    entries.truncate(MAX_HISTORY_ENTRIES);
                    entries
                }
                Err(e) => {
                    log::warn!("Discarding unreadable search history: {e}");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                log::warn!("Failed to read search history: {e}");
                Vec::new()
            }
        };
        Self { store, entries }
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    /// Adds an entry and writes the whole list back.
    ///
    /// The in-memory list is updated even when the write fails.
    pub async fn push(&mut self, entry: HistoryEntry) -> Result<(), StorageError> {
        push_entry(&mut self.entries, entry);
        let raw = serde_json::to_string(&self.entries)?;
        self.store.set(HISTORY_KEY, &raw).await
    }

    pub async fn clear(&mut self) -> Result<(), StorageError> {
        self.entries.clear();
        self.store.remove(HISTORY_KEY).await
    }
}
