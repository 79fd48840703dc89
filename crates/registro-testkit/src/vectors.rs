//! Golden vectors for cross-implementation verification.
//!
//! Every implementation of the canonical hash scheme must reproduce these
//! digests exactly: same normalization, same field order, same separator,
//! same version tag.

use serde::{Deserialize, Serialize};

use registro_core::{compute_cert_hash, CertHash, SCHEMA_VERSION};

/// A single golden vector: field inputs and the digest they must produce.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoldenVector {
    pub name: String,
    pub description: String,

    // Inputs, in hash order
    pub field_name: String,
    pub date_of_birth: String,
    pub time_of_birth: String,
    pub place_of_birth: String,
    pub father_name: String,
    pub mother_name: String,

    // Expected lowercase hex digest under the current schema version
    pub expected_digest: String,
}

impl GoldenVector {
    /// Compute the digest for this vector's inputs.
    pub fn compute_digest(&self) -> CertHash {
        compute_cert_hash(
            &self.field_name,
            &self.date_of_birth,
            &self.time_of_birth,
            &self.place_of_birth,
            &self.father_name,
            &self.mother_name,
            SCHEMA_VERSION,
        )
    }
}

fn vector(
    name: &str,
    description: &str,
    fields: [&str; 6],
    expected_digest: &str,
) -> GoldenVector {
    GoldenVector {
        name: name.to_string(),
        description: description.to_string(),
        field_name: fields[0].to_string(),
        date_of_birth: fields[1].to_string(),
        time_of_birth: fields[2].to_string(),
        place_of_birth: fields[3].to_string(),
        father_name: fields[4].to_string(),
        mother_name: fields[5].to_string(),
        expected_digest: expected_digest.to_string(),
    }
}

/// All golden vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        vector(
            "plain_ascii",
            "Clean ASCII fields, no normalization needed",
            [
                "Jane Doe",
                "1990-01-01",
                "08:00",
                "City A",
                "John Doe",
                "Mary Doe",
            ],
            "b9587fffc19115d6d3459a8c16038525fa27df958096e8696eea4217eceb13db",
        ),
        vector(
            "whitespace_noise",
            "Same fields with padding and doubled spaces; digest unchanged",
            [
                "  Jane   Doe ",
                "1990-01-01",
                "\t08:00",
                "City  A",
                "John\nDoe",
                " Mary Doe  ",
            ],
            "b9587fffc19115d6d3459a8c16038525fa27df958096e8696eea4217eceb13db",
        ),
        vector(
            "all_empty",
            "All essential fields empty; only separators and version hashed",
            ["", "", "", "", "", ""],
            "96ba579e6415ec40ad464938300083d97978643f2308e1d192bb75c3d934b05e",
        ),
        vector(
            "non_ascii",
            "Accented names hash over their UTF-8 bytes",
            [
                "João da Silva",
                "2001-12-31",
                "23:59",
                "São Paulo",
                "Carlos da Silva",
                "Ana da Silva",
            ],
            "70044e0203df85c8d242d78b38c5726595d3b880acf39a203525b05a5d8e90e4",
        ),
    ]
}

/// Verify every vector; returns the first mismatch, if any.
pub fn verify_all_vectors() -> Result<(), String> {
    for vector in all_vectors() {
        let digest = vector.compute_digest().to_hex();
        if digest != vector.expected_digest {
            return Err(format!(
                "vector {}: expected {}, got {}",
                vector.name, vector.expected_digest, digest
            ));
        }
    }
    Ok(())
}
