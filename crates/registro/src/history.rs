//! History reconstruction: typed snapshots from the store's raw change log.
//!
//! The store reports a key's history as opaque byte versions;
//! [`HistoryReconstructor`] turns them into an ordered sequence of typed
//! [`HistoryEntry`] values, preserving the store's own commit order. It is
//! read-only and independent of the registry's write path.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use registro_core::CertificateRecord;
use registro_store::{KeyModification, RecordStore};

use crate::error::Result;

/// A record's state at one historical version.
#[derive(Debug, Clone, PartialEq)]
pub enum Snapshot {
    /// The record as stored at this version.
    Present(CertificateRecord),
    /// The version is a store-level deletion. This registry's own
    /// operations never produce one, but the change-log format represents
    /// it generically.
    Deleted,
    /// The stored bytes at this version could not be parsed. Lenient-read
    /// policy for the history path only: a null snapshot instead of an
    /// aborted read.
    Unreadable,
}

/// One historical version of a record, as reported by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    /// Transaction id of the committing write.
    pub tx_id: String,
    /// Commit timestamp, as the store reports it.
    pub timestamp: DateTime<Utc>,
    /// The record's state at this version.
    pub snapshot: Snapshot,
}

impl HistoryEntry {
    /// The record at this version, when one is readable.
    pub fn record(&self) -> Option<&CertificateRecord> {
        match &self.snapshot {
            Snapshot::Present(record) => Some(record),
            Snapshot::Deleted | Snapshot::Unreadable => None,
        }
    }

    /// Whether this version is a deletion.
    pub fn is_delete(&self) -> bool {
        matches!(self.snapshot, Snapshot::Deleted)
    }
}

// Wire shape: {txId, timestamp, value: Record|null, isDelete}. Deleted and
// Unreadable both carry a null value; only Deleted sets isDelete.
impl Serialize for HistoryEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("HistoryEntry", 4)?;
        state.serialize_field("txId", &self.tx_id)?;
        state.serialize_field("timestamp", &self.timestamp)?;
        match &self.snapshot {
            Snapshot::Present(record) => state.serialize_field("value", record)?,
            Snapshot::Deleted | Snapshot::Unreadable => {
                state.serialize_field("value", &Option::<CertificateRecord>::None)?
            }
        }
        state.serialize_field("isDelete", &self.is_delete())?;
        state.end()
    }
}

/// Reconstructs a record's full mutation history from the store's change log.
pub struct HistoryReconstructor<S: RecordStore> {
    store: Arc<S>,
}

impl<S: RecordStore> HistoryReconstructor<S> {
    /// Create a reconstructor over the given store.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// The full history of an id, oldest to newest.
    ///
    /// One store round trip; no pagination or filtering, and no re-sorting:
    /// entries come back in the store's own commit order. An unknown id
    /// yields an empty sequence.
    pub async fn get_history(&self, id: &str) -> Result<Vec<HistoryEntry>> {
        let modifications = self.store.history_of(id).await?;
        Ok(modifications.into_iter().map(reconstruct_entry).collect())
    }
}

fn reconstruct_entry(modification: KeyModification) -> HistoryEntry {
    let snapshot = if modification.is_delete {
        Snapshot::Deleted
    } else {
        match modification
            .value
            .as_deref()
            .map(serde_json::from_slice::<CertificateRecord>)
        {
            Some(Ok(record)) => Snapshot::Present(record),
            Some(Err(e)) => {
                tracing::warn!(
                    tx_id = %modification.tx_id,
                    error = %e,
                    "unparsable historical value, reporting null snapshot"
                );
                Snapshot::Unreadable
            }
            None => Snapshot::Unreadable,
        }
    };

    HistoryEntry {
        tx_id: modification.tx_id,
        timestamp: modification.timestamp,
        snapshot,
    }
}
