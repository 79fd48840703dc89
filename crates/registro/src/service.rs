//! The registry service: the record lifecycle state machine.
//!
//! A record moves absent -> active and stays there; there is no deleted
//! state. Every operation is one read-modify-write (or read-only) exchange
//! with the store, touching exactly one record. The service holds no state
//! of its own: all transitions are the pure functions on
//! [`CertificateRecord`], and all durable state lives behind [`RecordStore`].

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;

use registro_core::{parse_metadata, CertificateRecord, EssentialFields, Field};
use registro_store::{InsertOutcome, RecordStore};

use crate::error::{RegistryError, Result};

/// Inputs for registering a new certificate.
#[derive(Debug, Clone)]
pub struct RegisterRequest {
    /// Caller-supplied record id, the sole identity of the record.
    pub id: String,
    pub name: String,
    pub date_of_birth: String,
    pub time_of_birth: String,
    pub place_of_birth: String,
    pub father_name: String,
    pub mother_name: String,
    pub owner: String,
    /// Originating registry office, e.g. a cartorio.
    pub source: String,
    /// JSON object of string to string; empty input means no metadata.
    pub metadata_json: String,
}

/// Outcome of verifying a stored record against its canonical hash.
///
/// Serializes to the VerifyCert wire object:
/// `{found, record, hashMatch, hashCheckExplanation}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Verification {
    pub found: bool,
    pub record: CertificateRecord,
    /// Integrity probe: true for any record produced solely through this
    /// service's write paths.
    pub hash_match: bool,
    /// Human-readable explanation naming the recomputed digest.
    pub hash_check_explanation: String,
}

/// The registry service, generic over its storage backend.
pub struct RegistryService<S: RecordStore> {
    store: Arc<S>,
}

impl<S: RecordStore> RegistryService<S> {
    /// Create a service over the given store.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Register a new certificate: absent -> active.
    ///
    /// Fails with `AlreadyExists` when the id is present (no mutation), and
    /// with `InvalidMetadata` when the metadata payload is non-empty and not
    /// a well-formed string map. Creation is compare-and-set against
    /// absence, so concurrent registers of the same id cannot both succeed.
    pub async fn register(&self, req: RegisterRequest) -> Result<CertificateRecord> {
        if self.store.get(&req.id).await?.is_some() {
            return Err(RegistryError::AlreadyExists(req.id));
        }

        let metadata = parse_metadata(&req.metadata_json)?;

        let fields = EssentialFields {
            name: req.name,
            date_of_birth: req.date_of_birth,
            time_of_birth: req.time_of_birth,
            place_of_birth: req.place_of_birth,
            father_name: req.father_name,
            mother_name: req.mother_name,
        };
        let record = CertificateRecord::create(
            req.id,
            fields,
            req.owner,
            req.source,
            metadata,
            Utc::now(),
        );

        let bytes = encode_record(&record)?;
        match self.store.put_new(&record.id, &bytes).await? {
            InsertOutcome::Inserted => {
                tracing::debug!(id = %record.id, hash = %record.hash, "registered certificate");
                Ok(record)
            }
            InsertOutcome::AlreadyExists => Err(RegistryError::AlreadyExists(record.id.clone())),
        }
    }

    /// Verify a stored record against its recomputed canonical hash.
    ///
    /// Read-only; no state transition. A false `hash_match` means the
    /// persisted bytes were altered through a channel outside this service's
    /// control.
    pub async fn verify(&self, id: &str) -> Result<Verification> {
        let record = self.load(id).await?;

        let expected = record.expected_hash();
        let hash_match = expected.to_hex() == record.hash;

        Ok(Verification {
            found: true,
            hash_match,
            hash_check_explanation: format!(
                "hash recomputed from essential fields: {}",
                expected
            ),
            record,
        })
    }

    /// Update a single whitelisted field of an existing record.
    ///
    /// Fails with `NotFound` when the id is absent and `InvalidField` when
    /// the field name is not on the whitelist (record untouched). The
    /// canonical hash is recomputed unconditionally and the timestamp
    /// refreshed; the same id is overwritten, with the store retaining the
    /// prior version in its history.
    pub async fn update_field(
        &self,
        id: &str,
        field_name: &str,
        new_value: &str,
    ) -> Result<CertificateRecord> {
        let mut record = self.load(id).await?;

        let field = Field::parse(field_name)?;
        record.apply_update(field, new_value.to_string(), Utc::now());

        let bytes = encode_record(&record)?;
        self.store.put(id, &bytes).await?;

        tracing::debug!(id = %id, field = ?field, "updated certificate field");
        Ok(record)
    }

    async fn load(&self, id: &str) -> Result<CertificateRecord> {
        let bytes = self
            .store
            .get(id)
            .await?
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))?;
        decode_record(&bytes)
    }
}

fn encode_record(record: &CertificateRecord) -> Result<Vec<u8>> {
    serde_json::to_vec(record).map_err(|e| RegistryError::Serialization(e.to_string()))
}

fn decode_record(bytes: &[u8]) -> Result<CertificateRecord> {
    serde_json::from_slice(bytes).map_err(|e| RegistryError::Serialization(e.to_string()))
}
