//! Canonical text form and hash input construction.
//!
//! The canonical hash must be identical for field values that differ only in
//! incidental whitespace, across every process and platform that computes
//! it. Two rules produce that stability:
//!
//! 1. Each field is normalized: trimmed, internal whitespace runs collapsed
//!    to a single space.
//! 2. The normalized fields are joined with `|` in a fixed order:
//!    `name|dob|tob|place|father|mother|version`.
//!
//! The field order is part of the contract. Reordering changes the hash
//! space and must never happen within a deployed schema version.
//!
//! Normalization applies only to the values fed into hashing, never to the
//! values persisted in the record.

use crate::crypto::CertHash;

/// Separator between hash input fields.
///
/// Known gap: a field value containing `|` can collide with a
/// differently-segmented input that joins to the same string. The `"v1"`
/// scheme does not escape the separator; a future version should
/// length-prefix each field and bump the version tag.
const FIELD_SEPARATOR: &str = "|";

/// Normalize free text into its canonical form.
///
/// Strips leading/trailing whitespace and collapses any internal run of
/// whitespace to a single space. Total (empty in, empty out) and idempotent.
pub fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Build the canonical hash input for a certificate.
///
/// Fields are normalized independently, then joined in the fixed order.
pub fn hash_input(
    name: &str,
    date_of_birth: &str,
    time_of_birth: &str,
    place_of_birth: &str,
    father_name: &str,
    mother_name: &str,
    version: &str,
) -> String {
    [
        normalize(name),
        normalize(date_of_birth),
        normalize(time_of_birth),
        normalize(place_of_birth),
        normalize(father_name),
        normalize(mother_name),
        normalize(version),
    ]
    .join(FIELD_SEPARATOR)
}

/// Compute the canonical certificate hash.
///
/// SHA-256 over the UTF-8 bytes of the joined canonical form. Identical
/// essential-field values (up to normalization) and identical version always
/// yield the identical digest.
pub fn compute_cert_hash(
    name: &str,
    date_of_birth: &str,
    time_of_birth: &str,
    place_of_birth: &str,
    father_name: &str,
    mother_name: &str,
    version: &str,
) -> CertHash {
    let input = hash_input(
        name,
        date_of_birth,
        time_of_birth,
        place_of_birth,
        father_name,
        mother_name,
        version,
    );
    CertHash::hash(input.as_bytes())
}
