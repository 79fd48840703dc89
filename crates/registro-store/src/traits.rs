//! RecordStore trait: the abstract interface for record persistence.
//!
//! This trait is the registry's only storage boundary. Implementations
//! include SQLite (primary) and in-memory (for tests); a production
//! deployment substitutes the replicated ledger substrate behind the same
//! interface.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;

/// Result of a compare-and-set insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The key was absent; the value was written.
    Inserted,
    /// A value already exists under the key; nothing was written.
    AlreadyExists,
}

/// One entry of a key's ordered change history.
///
/// `value` is the raw stored bytes at that version, or `None` when the
/// version is a deletion. `is_delete` mirrors the store-level change-log
/// contract even though the registry's own operations never delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyModification {
    /// Store-assigned transaction id of the committing write.
    pub tx_id: String,
    /// Commit timestamp assigned by the store.
    pub timestamp: DateTime<Utc>,
    /// Stored bytes at this version; absent for deletions.
    pub value: Option<Vec<u8>>,
    /// Whether this version is a deletion.
    pub is_delete: bool,
}

/// The RecordStore trait: async interface for record persistence.
///
/// # Design Notes
///
/// - **Point reads/writes only**: one key per call; the registry never
///   touches more than one record per operation.
/// - **History is append-only**: every `put`/`put_new` retains the prior
///   version in the per-key change log, oldest to newest.
/// - **Creation is compare-and-set**: `put_new` never overwrites; concurrent
///   creators of the same key cannot both succeed.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Read the current value under a key, if any.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Write a value under a key, overwriting the current version.
    ///
    /// The prior version is retained in the key's history.
    async fn put(&self, key: &str, bytes: &[u8]) -> Result<()>;

    /// Write a value under a key only if the key is absent.
    ///
    /// Returns `AlreadyExists` (with no mutation) when a value is present.
    async fn put_new(&self, key: &str, bytes: &[u8]) -> Result<InsertOutcome>;

    /// The key's full change history in commit order, oldest to newest.
    ///
    /// One round trip; no pagination. An unknown key yields an empty
    /// sequence.
    async fn history_of(&self, key: &str) -> Result<Vec<KeyModification>>;
}
