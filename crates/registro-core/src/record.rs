//! The certificate record and its pure state transitions.
//!
//! A [`CertificateRecord`] is the unit of storage, keyed by a caller-supplied
//! id. Six essential fields (name, date/time/place of birth, father's and
//! mother's names) determine the canonical hash; owner, source, and metadata
//! mutate freely without affecting it.
//!
//! All transitions here are pure: `(current record, inputs, now)` in, new
//! record out. Persistence belongs to the service layer.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::canonical::compute_cert_hash;
use crate::crypto::CertHash;
use crate::error::CoreError;

/// Schema version tag for the current record generation.
///
/// Included in every hash computation so a future hash-scheme change can
/// bump the tag and keep the hash spaces disjoint. Not a wire field.
pub const SCHEMA_VERSION: &str = "v1";

/// The six fields that feed the canonical hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EssentialFields {
    pub name: String,
    pub date_of_birth: String,
    pub time_of_birth: String,
    pub place_of_birth: String,
    pub father_name: String,
    pub mother_name: String,
}

impl EssentialFields {
    /// Canonical hash of these fields under the current schema version.
    pub fn cert_hash(&self) -> CertHash {
        compute_cert_hash(
            &self.name,
            &self.date_of_birth,
            &self.time_of_birth,
            &self.place_of_birth,
            &self.father_name,
            &self.mother_name,
            SCHEMA_VERSION,
        )
    }
}

/// A civil-registry record as persisted in the store.
///
/// Field names serialize exactly as the wire schema requires (camelCase).
/// `timestamp` is the UTC instant of the last mutation, RFC 3339 on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateRecord {
    pub id: String,
    pub hash: String,
    pub name: String,
    pub date_of_birth: String,
    pub time_of_birth: String,
    pub place_of_birth: String,
    pub father_name: String,
    pub mother_name: String,
    pub owner: String,
    pub timestamp: DateTime<Utc>,
    pub metadata: BTreeMap<String, String>,
    pub source: String,
}

impl CertificateRecord {
    /// Create a new record: absent -> active.
    ///
    /// Computes the canonical hash from the essential fields and stamps the
    /// record with `now`.
    pub fn create(
        id: impl Into<String>,
        fields: EssentialFields,
        owner: impl Into<String>,
        source: impl Into<String>,
        metadata: BTreeMap<String, String>,
        now: DateTime<Utc>,
    ) -> Self {
        let hash = fields.cert_hash().to_hex();
        Self {
            id: id.into(),
            hash,
            name: fields.name,
            date_of_birth: fields.date_of_birth,
            time_of_birth: fields.time_of_birth,
            place_of_birth: fields.place_of_birth,
            father_name: fields.father_name,
            mother_name: fields.mother_name,
            owner: owner.into(),
            timestamp: now,
            metadata,
            source: source.into(),
        }
    }

    /// Recompute the canonical hash from the record's current fields.
    ///
    /// For a record produced solely through this crate's transitions the
    /// result equals the stored `hash`; a mismatch means the persisted bytes
    /// were altered outside the registry's control.
    pub fn expected_hash(&self) -> CertHash {
        compute_cert_hash(
            &self.name,
            &self.date_of_birth,
            &self.time_of_birth,
            &self.place_of_birth,
            &self.father_name,
            &self.mother_name,
            SCHEMA_VERSION,
        )
    }

    /// Apply a single whitelisted field update.
    ///
    /// The hash is recomputed unconditionally, even for `owner`/`source`
    /// which do not participate in it. The timestamp never moves backwards:
    /// if `now` reads earlier than the stored instant, the stored instant
    /// is kept.
    pub fn apply_update(&mut self, field: Field, value: String, now: DateTime<Utc>) {
        match field {
            Field::Name => self.name = value,
            Field::DateOfBirth => self.date_of_birth = value,
            Field::TimeOfBirth => self.time_of_birth = value,
            Field::PlaceOfBirth => self.place_of_birth = value,
            Field::FatherName => self.father_name = value,
            Field::MotherName => self.mother_name = value,
            Field::Owner => self.owner = value,
            Field::Source => self.source = value,
        }
        self.hash = self.expected_hash().to_hex();
        self.timestamp = now.max(self.timestamp);
    }
}

/// The whitelist of fields UpdateCert may change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    DateOfBirth,
    TimeOfBirth,
    PlaceOfBirth,
    FatherName,
    MotherName,
    Owner,
    Source,
}

impl Field {
    /// Parse a caller-supplied field name.
    ///
    /// The match is whitespace-trimmed and case-insensitive; the error
    /// echoes the caller's input verbatim.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        match raw.trim().to_lowercase().as_str() {
            "name" => Ok(Field::Name),
            "dateofbirth" => Ok(Field::DateOfBirth),
            "timeofbirth" => Ok(Field::TimeOfBirth),
            "placeofbirth" => Ok(Field::PlaceOfBirth),
            "fathername" => Ok(Field::FatherName),
            "mothername" => Ok(Field::MotherName),
            "owner" => Ok(Field::Owner),
            "source" => Ok(Field::Source),
            _ => Err(CoreError::UnknownField(raw.to_string())),
        }
    }

    /// Whether this field participates in the canonical hash.
    pub fn is_essential(&self) -> bool {
        !matches!(self, Field::Owner | Field::Source)
    }
}

/// Parse a caller-supplied metadata payload.
///
/// Empty input maps to an empty mapping; non-empty input must be a JSON
/// object of string to string.
pub fn parse_metadata(raw: &str) -> Result<BTreeMap<String, String>, CoreError> {
    if raw.is_empty() {
        return Ok(BTreeMap::new());
    }
    serde_json::from_str(raw).map_err(|e| CoreError::InvalidMetadata(e.to_string()))
}
