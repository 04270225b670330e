//! Search history persisted in a SQLite file.

use std::sync::Arc;

use chrono::{Duration, Utc};
use network_monitor::config::{HISTORY_KEY, MAX_HISTORY_ENTRIES};
use network_monitor::history::{HistoryEntry, HistoryStore, KeyValueStore, SqliteStore};
use network_monitor::lookup::LookupSnapshot;
use tempfile::TempDir;

fn entry(target: &str, offset_secs: i64) -> HistoryEntry {
    HistoryEntry {
        target: target.to_string(),
        timestamp: Utc::now() + Duration::seconds(offset_secs),
        data: LookupSnapshot::default(),
    }
}

#[tokio::test]
async fn test_history_survives_reopen() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = dir.path().join("history.db");

    {
        let store: Arc<dyn KeyValueStore> = Arc::new(SqliteStore::open(&db_path).await.unwrap());
        let mut history = HistoryStore::load(store).await;
        for i in 0..12 {
            history
                .push(entry(&format!("host{i}.example.com"), i))
                .await
                .unwrap();
        }
        assert_eq!(history.entries().len(), MAX_HISTORY_ENTRIES);
    }

    let store: Arc<dyn KeyValueStore> = Arc::new(SqliteStore::open(&db_path).await.unwrap());
    let history = HistoryStore::load(store).await;
    let targets: Vec<_> = history.entries().iter().map(|e| e.target.clone()).collect();
    assert_eq!(targets.len(), 10);
    assert_eq!(targets[0], "host11.example.com");
    assert_eq!(targets[9], "host2.example.com");
}

#[tokio::test]
async fn test_corrupt_row_loads_as_empty() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = dir.path().join("history.db");
    let store = Arc::new(SqliteStore::open(&db_path).await.unwrap());
    store.set(HISTORY_KEY, "[{\"target\":").await.unwrap();

    let mut history = HistoryStore::load(store.clone()).await;
    assert!(history.entries().is_empty());

    // A later push overwrites the unreadable value
    history.push(entry("8.8.8.8", 0)).await.unwrap();
    let reloaded = HistoryStore::load(store).await;
    assert_eq!(reloaded.entries().len(), 1);
}

#[tokio::test]
async fn test_open_fails_in_missing_directory() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = dir.path().join("missing").join("history.db");
    assert!(SqliteStore::open(&db_path).await.is_err());
}
