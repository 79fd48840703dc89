//! In-memory implementation of the RecordStore trait.
//!
//! This is primarily for testing. It has the same semantics as SQLite
//! but keeps everything in memory with no persistence.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;

use crate::error::Result;
use crate::traits::{InsertOutcome, KeyModification, RecordStore};

/// In-memory store implementation.
///
/// All data is lost when the store is dropped. Thread-safe via RwLock.
pub struct MemoryStore {
    inner: RwLock<MemoryStoreInner>,
}

struct MemoryStoreInner {
    /// Current value per key.
    records: HashMap<String, Vec<u8>>,

    /// Per-key change history, oldest to newest.
    history: HashMap<String, Vec<KeyModification>>,

    /// Monotonic transaction counter.
    next_tx: u64,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(MemoryStoreInner {
                records: HashMap::new(),
                history: HashMap::new(),
                next_tx: 1,
            }),
        }
    }

    /// Delete the current value under a key, recording a deletion version.
    ///
    /// Store-level operation only: the registry's own write paths never
    /// delete. Exists so the change-log representation of deletions can be
    /// exercised.
    pub fn delete(&self, key: &str) {
        let mut inner = self.inner.write().unwrap();
        inner.records.remove(key);
        let entry = KeyModification {
            tx_id: format!("{:016x}", inner.next_tx),
            timestamp: Utc::now(),
            value: None,
            is_delete: true,
        };
        inner.next_tx += 1;
        inner.history.entry(key.to_string()).or_default().push(entry);
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStoreInner {
    fn commit(&mut self, key: &str, bytes: &[u8]) {
        let entry = KeyModification {
            tx_id: format!("{:016x}", self.next_tx),
            timestamp: Utc::now(),
            value: Some(bytes.to_vec()),
            is_delete: false,
        };
        self.next_tx += 1;
        self.records.insert(key.to_string(), bytes.to_vec());
        self.history.entry(key.to_string()).or_default().push(entry);
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let inner = self.inner.read().unwrap();
        Ok(inner.records.get(key).cloned())
    }

    async fn put(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let mut inner = self.inner.write().unwrap();
        inner.commit(key, bytes);
        Ok(())
    }

    async fn put_new(&self, key: &str, bytes: &[u8]) -> Result<InsertOutcome> {
        let mut inner = self.inner.write().unwrap();
        if inner.records.contains_key(key) {
            return Ok(InsertOutcome::AlreadyExists);
        }
        inner.commit(key, bytes);
        Ok(InsertOutcome::Inserted)
    }

    async fn history_of(&self, key: &str) -> Result<Vec<KeyModification>> {
        let inner = self.inner.read().unwrap();
        Ok(inner.history.get(key).cloned().unwrap_or_default())
    }
}
