//! Integration tests for the registry lifecycle over the in-memory store.

use std::sync::Arc;

use registro::store::{MemoryStore, RecordStore};
use registro::{
    compute_cert_hash, HistoryReconstructor, RegisterRequest, RegistryError, RegistryService,
    Snapshot,
};

fn sample_request(id: &str) -> RegisterRequest {
    RegisterRequest {
        id: id.to_string(),
        name: "Jane Doe".into(),
        date_of_birth: "1990-01-01".into(),
        time_of_birth: "08:00".into(),
        place_of_birth: "City A".into(),
        father_name: "John Doe".into(),
        mother_name: "Mary Doe".into(),
        owner: "OwnerA".into(),
        source: "CartorioX".into(),
        metadata_json: String::new(),
    }
}

fn setup() -> (
    Arc<MemoryStore>,
    RegistryService<MemoryStore>,
    HistoryReconstructor<MemoryStore>,
) {
    let store = Arc::new(MemoryStore::new());
    let registry = RegistryService::new(store.clone());
    let history = HistoryReconstructor::new(store.clone());
    (store, registry, history)
}

#[tokio::test]
async fn register_then_verify_round_trip() {
    let (_, registry, _) = setup();

    let registered = registry.register(sample_request("cert1")).await.unwrap();

    let verification = registry.verify("cert1").await.unwrap();
    assert!(verification.found);
    assert!(verification.hash_match);
    assert_eq!(verification.record, registered);

    let record = &verification.record;
    assert_eq!(record.id, "cert1");
    assert_eq!(record.name, "Jane Doe");
    assert_eq!(record.owner, "OwnerA");
    assert_eq!(record.source, "CartorioX");
    assert!(record.metadata.is_empty());

    // Explanation names the recomputed digest
    assert!(verification
        .hash_check_explanation
        .contains(&record.hash));
}

#[tokio::test]
async fn registration_persists_raw_values_but_hashes_normalized() {
    let (_, registry, _) = setup();

    let mut req = sample_request("cert1");
    req.name = "  Jane   Doe ".into();
    let record = registry.register(req).await.unwrap();

    // Stored value keeps the caller's whitespace; only the hash input is
    // normalized.
    assert_eq!(record.name, "  Jane   Doe ");
    assert_eq!(
        record.hash,
        "b9587fffc19115d6d3459a8c16038525fa27df958096e8696eea4217eceb13db"
    );
    assert!(registry.verify("cert1").await.unwrap().hash_match);
}

#[tokio::test]
async fn duplicate_register_fails_without_mutation() {
    let (store, registry, history) = setup();

    let first = registry.register(sample_request("cert1")).await.unwrap();

    let mut second = sample_request("cert1");
    second.owner = "Someone Else".into();
    let err = registry.register(second).await.unwrap_err();
    assert!(matches!(err, RegistryError::AlreadyExists(ref id) if id == "cert1"));

    // Store still holds exactly the state after the first call
    let stored = store.get("cert1").await.unwrap().unwrap();
    let decoded: registro::CertificateRecord = serde_json::from_slice(&stored).unwrap();
    assert_eq!(decoded, first);
    assert_eq!(history.get_history("cert1").await.unwrap().len(), 1);
}

#[tokio::test]
async fn verify_missing_record_is_not_found() {
    let (_, registry, _) = setup();
    let err = registry.verify("ghost").await.unwrap_err();
    assert!(matches!(err, RegistryError::NotFound(ref id) if id == "ghost"));
}

#[tokio::test]
async fn update_owner_changes_timestamp_but_not_hash() {
    let (_, registry, _) = setup();

    let registered = registry.register(sample_request("cert1")).await.unwrap();
    let updated = registry
        .update_field("cert1", "owner", "NewOwner")
        .await
        .unwrap();

    assert_eq!(updated.owner, "NewOwner");
    assert_eq!(updated.hash, registered.hash);
    assert!(updated.timestamp >= registered.timestamp);

    let verification = registry.verify("cert1").await.unwrap();
    assert!(verification.hash_match);
}

#[tokio::test]
async fn update_name_recomputes_hash() {
    let (_, registry, _) = setup();

    let registered = registry.register(sample_request("cert1")).await.unwrap();
    let updated = registry
        .update_field("cert1", "name", "New Name")
        .await
        .unwrap();

    assert_eq!(updated.name, "New Name");
    assert_ne!(updated.hash, registered.hash);

    let expected = compute_cert_hash(
        "New Name",
        "1990-01-01",
        "08:00",
        "City A",
        "John Doe",
        "Mary Doe",
        "v1",
    );
    assert_eq!(updated.hash, expected.to_hex());

    let verification = registry.verify("cert1").await.unwrap();
    assert!(verification.hash_match);
}

#[tokio::test]
async fn update_field_name_is_trimmed_and_case_insensitive() {
    let (_, registry, _) = setup();
    registry.register(sample_request("cert1")).await.unwrap();

    let updated = registry
        .update_field("cert1", "  DateOfBirth ", "1991-02-02")
        .await
        .unwrap();
    assert_eq!(updated.date_of_birth, "1991-02-02");
    assert!(registry.verify("cert1").await.unwrap().hash_match);
}

#[tokio::test]
async fn update_unknown_field_leaves_record_untouched() {
    let (store, registry, _) = setup();
    registry.register(sample_request("cert1")).await.unwrap();

    let before = store.get("cert1").await.unwrap().unwrap();

    let err = registry.update_field("cert1", "ssn", "x").await.unwrap_err();
    assert!(matches!(err, RegistryError::InvalidField(ref raw) if raw == "ssn"));

    let after = store.get("cert1").await.unwrap().unwrap();
    assert_eq!(before, after);
}

#[tokio::test]
async fn update_missing_record_is_not_found() {
    let (_, registry, _) = setup();
    let err = registry
        .update_field("ghost", "owner", "x")
        .await
        .unwrap_err();
    assert!(matches!(err, RegistryError::NotFound(_)));
}

#[tokio::test]
async fn register_with_malformed_metadata_fails_cleanly() {
    let (store, registry, _) = setup();

    let mut req = sample_request("cert1");
    req.metadata_json = "{not json".into();
    let err = registry.register(req).await.unwrap_err();
    assert!(matches!(err, RegistryError::InvalidMetadata(_)));

    assert!(store.get("cert1").await.unwrap().is_none());
}

#[tokio::test]
async fn register_carries_metadata_through() {
    let (_, registry, _) = setup();

    let mut req = sample_request("cert1");
    req.metadata_json = r#"{"book":"12","page":"34"}"#.into();
    let record = registry.register(req).await.unwrap();

    assert_eq!(record.metadata.get("book").map(String::as_str), Some("12"));
    assert_eq!(record.metadata.get("page").map(String::as_str), Some("34"));
}

#[tokio::test]
async fn history_returns_one_entry_per_write_in_commit_order() {
    let (_, registry, history) = setup();

    registry.register(sample_request("cert1")).await.unwrap();
    registry
        .update_field("cert1", "owner", "NewOwner")
        .await
        .unwrap();
    registry
        .update_field("cert1", "name", "New Name")
        .await
        .unwrap();

    let entries = history.get_history("cert1").await.unwrap();
    assert_eq!(entries.len(), 3);
    assert!(entries.iter().all(|e| !e.is_delete()));

    let v0 = entries[0].record().unwrap();
    assert_eq!(v0.owner, "OwnerA");
    assert_eq!(v0.name, "Jane Doe");

    let v1 = entries[1].record().unwrap();
    assert_eq!(v1.owner, "NewOwner");
    assert_eq!(v1.name, "Jane Doe");

    let v2 = entries[2].record().unwrap();
    assert_eq!(v2.owner, "NewOwner");
    assert_eq!(v2.name, "New Name");

    // Distinct transaction ids, non-decreasing commit timestamps
    assert_ne!(entries[0].tx_id, entries[1].tx_id);
    assert_ne!(entries[1].tx_id, entries[2].tx_id);
    assert!(entries[0].timestamp <= entries[1].timestamp);
    assert!(entries[1].timestamp <= entries[2].timestamp);
}

#[tokio::test]
async fn history_of_unknown_id_is_empty() {
    let (_, _, history) = setup();
    assert!(history.get_history("ghost").await.unwrap().is_empty());
}

#[tokio::test]
async fn history_represents_store_level_deletion() {
    let (store, registry, history) = setup();

    registry.register(sample_request("cert1")).await.unwrap();
    store.delete("cert1");

    let entries = history.get_history("cert1").await.unwrap();
    assert_eq!(entries.len(), 2);
    assert!(!entries[0].is_delete());
    assert!(entries[1].is_delete());
    assert_eq!(entries[1].snapshot, Snapshot::Deleted);
    assert!(entries[1].record().is_none());
}

#[tokio::test]
async fn unreadable_history_value_becomes_null_snapshot() {
    let (store, registry, history) = setup();

    registry.register(sample_request("cert1")).await.unwrap();
    store.put("cert1", b"garbage, not a record").await.unwrap();

    let entries = history.get_history("cert1").await.unwrap();
    assert_eq!(entries.len(), 2);
    assert!(matches!(entries[0].snapshot, Snapshot::Present(_)));
    assert_eq!(entries[1].snapshot, Snapshot::Unreadable);
    // Lenient read: value is null but the version is not a deletion
    assert!(!entries[1].is_delete());
}

#[tokio::test]
async fn history_entries_serialize_to_wire_shape() {
    let (store, registry, history) = setup();

    registry.register(sample_request("cert1")).await.unwrap();
    store.delete("cert1");

    let entries = history.get_history("cert1").await.unwrap();
    let json = serde_json::to_value(&entries).unwrap();
    let arr = json.as_array().unwrap();
    assert_eq!(arr.len(), 2);

    for entry in arr {
        let obj = entry.as_object().unwrap();
        for key in ["txId", "timestamp", "value", "isDelete"] {
            assert!(obj.contains_key(key), "missing wire field {key}");
        }
        assert_eq!(obj.len(), 4);
    }

    assert!(arr[0]["value"].is_object());
    assert_eq!(arr[0]["isDelete"], serde_json::json!(false));
    assert!(arr[1]["value"].is_null());
    assert_eq!(arr[1]["isDelete"], serde_json::json!(true));
}

#[tokio::test]
async fn verification_serializes_to_wire_shape() {
    let (_, registry, _) = setup();
    registry.register(sample_request("cert1")).await.unwrap();

    let verification = registry.verify("cert1").await.unwrap();
    let json = serde_json::to_value(&verification).unwrap();
    let obj = json.as_object().unwrap();
    for key in ["found", "record", "hashMatch", "hashCheckExplanation"] {
        assert!(obj.contains_key(key), "missing wire field {key}");
    }
    assert_eq!(obj["found"], serde_json::json!(true));
    assert_eq!(obj["hashMatch"], serde_json::json!(true));
}

#[tokio::test]
async fn out_of_band_tampering_is_detected() {
    let (store, registry, _) = setup();

    registry.register(sample_request("cert1")).await.unwrap();

    // Alter the persisted bytes through a channel outside the service
    let bytes = store.get("cert1").await.unwrap().unwrap();
    let mut value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    value["name"] = serde_json::json!("Impostor");
    store
        .put("cert1", &serde_json::to_vec(&value).unwrap())
        .await
        .unwrap();

    let verification = registry.verify("cert1").await.unwrap();
    assert!(!verification.hash_match);
    assert_eq!(verification.record.name, "Impostor");
}
