//! # Registro
//!
//! Tamper-evident civil-registry records in a versioned, append-only store.
//!
//! ## Overview
//!
//! Registro keeps birth-certificate records whose integrity is anchored in a
//! canonical content hash: six essential fields (name, date/time/place of
//! birth, parents' names) are normalized, joined in a fixed order with a
//! schema version tag, and digested with SHA-256. The registry exposes three
//! write-side/read-side operations plus history reconstruction:
//!
//! - **Register**: create a record under a caller-supplied id (fails if the
//!   id exists)
//! - **Verify**: recompute the expected hash and report whether the stored
//!   record still matches it
//! - **UpdateField**: amend a single whitelisted field, recomputing the hash
//!   in the same step
//! - **GetHistory**: the record's full mutation history, in store commit
//!   order
//!
//! ## Key Concepts
//!
//! - **Record**: mutated in place, field by field; never deleted.
//! - **Canonical hash**: recomputed on every essential-field mutation; a
//!   mismatch on verify means the stored bytes were altered outside the
//!   registry.
//! - **Store**: a versioned key-value substrate that retains every prior
//!   version of a key; see [`registro_store`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use registro::{HistoryReconstructor, RegisterRequest, RegistryService};
//! use registro::store::MemoryStore;
//!
//! async fn example() {
//!     let store = Arc::new(MemoryStore::new());
//!     let registry = RegistryService::new(store.clone());
//!
//!     registry
//!         .register(RegisterRequest {
//!             id: "cert1".into(),
//!             name: "Jane Doe".into(),
//!             date_of_birth: "1990-01-01".into(),
//!             time_of_birth: "08:00".into(),
//!             place_of_birth: "City A".into(),
//!             father_name: "John Doe".into(),
//!             mother_name: "Mary Doe".into(),
//!             owner: "OwnerA".into(),
//!             source: "CartorioX".into(),
//!             metadata_json: "{}".into(),
//!         })
//!         .await
//!         .unwrap();
//!
//!     let verification = registry.verify("cert1").await.unwrap();
//!     assert!(verification.hash_match);
//!
//!     let history = HistoryReconstructor::new(store);
//!     let entries = history.get_history("cert1").await.unwrap();
//!     assert_eq!(entries.len(), 1);
//! }
//! ```
//!
//! ## Re-exports
//!
//! This crate re-exports the component crates for convenience:
//!
//! - `registro::core` - Core primitives (records, canonicalization, hashing)
//! - `registro::store` - Storage abstraction, SQLite and in-memory backends

pub mod error;
pub mod history;
pub mod service;

// Re-export component crates
pub use registro_core as core;
pub use registro_store as store;

// Re-export main types for convenience
pub use error::{RegistryError, Result};
pub use history::{HistoryEntry, HistoryReconstructor, Snapshot};
pub use service::{RegisterRequest, RegistryService, Verification};

// Re-export commonly used core types
pub use registro_core::{
    compute_cert_hash, normalize, CertHash, CertificateRecord, EssentialFields, Field,
    SCHEMA_VERSION,
};
