//! Proptest generators for property-based testing.

use proptest::prelude::*;

use registro::RegisterRequest;
use registro_core::EssentialFields;

/// Generate a record id.
pub fn record_id() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,31}".prop_map(String::from)
}

/// Generate free-text field content, possibly with incidental whitespace.
pub fn field_text() -> impl Strategy<Value = String> {
    "[ \\t]{0,2}[a-zA-Z0-9]{0,12}( {1,3}[a-zA-Z0-9]{1,12}){0,2}[ \\t]{0,2}".prop_map(String::from)
}

/// Generate a full set of essential fields.
pub fn essential_fields() -> impl Strategy<Value = EssentialFields> {
    (
        field_text(),
        field_text(),
        field_text(),
        field_text(),
        field_text(),
        field_text(),
    )
        .prop_map(
            |(name, date_of_birth, time_of_birth, place_of_birth, father_name, mother_name)| {
                EssentialFields {
                    name,
                    date_of_birth,
                    time_of_birth,
                    place_of_birth,
                    father_name,
                    mother_name,
                }
            },
        )
}

/// Parameters for generating a register request.
#[derive(Debug, Clone)]
pub struct CertParams {
    pub id: String,
    pub fields: EssentialFields,
    pub owner: String,
    pub source: String,
}

impl Arbitrary for CertParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (record_id(), essential_fields(), field_text(), field_text())
            .prop_map(|(id, fields, owner, source)| CertParams {
                id,
                fields,
                owner,
                source,
            })
            .boxed()
    }
}

/// Build a register request from parameters (no metadata).
pub fn request_from_params(params: &CertParams) -> RegisterRequest {
    RegisterRequest {
        id: params.id.clone(),
        name: params.fields.name.clone(),
        date_of_birth: params.fields.date_of_birth.clone(),
        time_of_birth: params.fields.time_of_birth.clone(),
        place_of_birth: params.fields.place_of_birth.clone(),
        father_name: params.fields.father_name.clone(),
        mother_name: params.fields.mother_name.clone(),
        owner: params.owner.clone(),
        source: params.source.clone(),
        metadata_json: String::new(),
    }
}
