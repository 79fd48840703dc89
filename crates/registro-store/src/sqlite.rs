//! SQLite implementation of the RecordStore trait.
//!
//! This is the primary storage backend for single-node deployments. It uses
//! rusqlite with bundled SQLite, wrapped in async via tokio::spawn_blocking.
//! Each write commits the current-state upsert and the history append in one
//! SQL transaction, so a reader can never observe one without the other.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Transaction};

use crate::error::{Result, StoreError};
use crate::migration;
use crate::traits::{InsertOutcome, KeyModification, RecordStore};

/// SQLite-based store implementation.
///
/// Thread-safe via internal Mutex. All operations use spawn_blocking
/// to avoid blocking the async runtime.
pub struct SqliteStore {
    /// The SQLite connection, protected by a mutex.
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open a SQLite database at the given path.
    ///
    /// Creates the file and runs migrations if it doesn't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut conn = Connection::open(path)?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open an in-memory SQLite database.
    ///
    /// Useful for testing.
    pub fn open_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run a closure against the connection on the blocking pool.
    async fn run_blocking<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = self.conn.clone();

        tokio::task::spawn_blocking(move || {
            let mut conn = conn.lock().map_err(|e| {
                StoreError::Database(rusqlite::Error::SqliteFailure(
                    rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_LOCKED),
                    Some(format!("mutex poisoned: {}", e)),
                ))
            })?;
            f(&mut conn)
        })
        .await
        .map_err(|e| {
            StoreError::Database(rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_ERROR),
                Some(format!("spawn_blocking failed: {}", e)),
            ))
        })?
    }
}

/// Upsert the current state and append the history row.
///
/// Must run inside an open transaction so both land atomically.
fn append_version(tx: &Transaction<'_>, key: &str, bytes: &[u8]) -> Result<()> {
    let now = Utc::now().timestamp_millis();

    tx.execute(
        "INSERT INTO records (key, value, updated_at) VALUES (?1, ?2, ?3)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        params![key, bytes, now],
    )?;

    // History rows are never deleted, so MAX(id)+1 is a fresh monotonic id.
    let next: i64 = tx.query_row(
        "SELECT COALESCE(MAX(id), 0) + 1 FROM record_history",
        [],
        |row| row.get(0),
    )?;

    tx.execute(
        "INSERT INTO record_history (key, tx_id, committed_at, value, is_delete)
         VALUES (?1, ?2, ?3, ?4, 0)",
        params![key, format!("{:016x}", next), now, bytes],
    )?;

    Ok(())
}

#[async_trait]
impl RecordStore for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let key = key.to_string();

        self.run_blocking(move |conn| {
            conn.query_row(
                "SELECT value FROM records WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(StoreError::from)
        })
        .await
    }

    async fn put(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let key = key.to_string();
        let bytes = bytes.to_vec();

        self.run_blocking(move |conn| {
            let tx = conn.transaction()?;
            append_version(&tx, &key, &bytes)?;
            tx.commit()?;
            Ok(())
        })
        .await
    }

    async fn put_new(&self, key: &str, bytes: &[u8]) -> Result<InsertOutcome> {
        let key = key.to_string();
        let bytes = bytes.to_vec();

        self.run_blocking(move |conn| {
            let tx = conn.transaction()?;

            let existing: Option<i64> = tx
                .query_row(
                    "SELECT 1 FROM records WHERE key = ?1",
                    params![key],
                    |row| row.get(0),
                )
                .optional()?;

            if existing.is_some() {
                return Ok(InsertOutcome::AlreadyExists);
            }

            append_version(&tx, &key, &bytes)?;
            tx.commit()?;
            Ok(InsertOutcome::Inserted)
        })
        .await
    }

    async fn history_of(&self, key: &str) -> Result<Vec<KeyModification>> {
        let key = key.to_string();

        self.run_blocking(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT tx_id, committed_at, value, is_delete
                 FROM record_history WHERE key = ?1 ORDER BY id ASC",
            )?;

            let rows = stmt.query_map(params![key], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, Option<Vec<u8>>>(2)?,
                    row.get::<_, bool>(3)?,
                ))
            })?;

            let mut history = Vec::new();
            for row in rows {
                let (tx_id, committed_at, value, is_delete) = row?;
                let timestamp = DateTime::<Utc>::from_timestamp_millis(committed_at)
                    .ok_or_else(|| {
                        StoreError::InvalidData(format!(
                            "history timestamp out of range: {}",
                            committed_at
                        ))
                    })?;
                history.push(KeyModification {
                    tx_id,
                    timestamp,
                    value,
                    is_delete,
                });
            }

            Ok(history)
        })
        .await
    }
}
