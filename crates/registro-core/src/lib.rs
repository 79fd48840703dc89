//! # Registro Core
//!
//! Pure primitives for the registro kernel: certificate records,
//! canonicalization, and content hashing.
//!
//! This crate contains no I/O, no storage, no networking. It is pure
//! computation over registry data: given a record and an input, it produces
//! a new record and a result.
//!
//! ## Key Types
//!
//! - [`CertificateRecord`] - A civil-registry record with its canonical hash
//! - [`CertHash`] - SHA-256 integrity fingerprint, lowercase hex on the wire
//! - [`Field`] - The whitelist of updatable record fields
//!
//! ## Canonicalization
//!
//! The canonical hash is derived from the six essential fields plus a schema
//! version tag, normalized and joined in a fixed order. See [`canonical`].

pub mod canonical;
pub mod crypto;
pub mod error;
pub mod record;

pub use canonical::{compute_cert_hash, normalize};
pub use crypto::CertHash;
pub use error::CoreError;
pub use record::{parse_metadata, CertificateRecord, EssentialFields, Field, SCHEMA_VERSION};
