//! The registry must behave identically over the SQLite backend.

use std::sync::Arc;

use registro::store::SqliteStore;
use registro::{HistoryReconstructor, RegisterRequest, RegistryError, RegistryService};

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

#[tokio::test]
async fn lifecycle_over_sqlite() {
    let store = Arc::new(SqliteStore::open_memory().unwrap());
    let registry = RegistryService::new(store.clone());
    let history = HistoryReconstructor::new(store);

    let registered = registry.register(sample_request("cert1")).await.unwrap();

    let err = registry.register(sample_request("cert1")).await.unwrap_err();
    assert!(matches!(err, RegistryError::AlreadyExists(_)));

    let updated = registry
        .update_field("cert1", "owner", "NewOwner")
        .await
        .unwrap();
    assert_eq!(updated.hash, registered.hash);

    registry
        .update_field("cert1", "name", "New Name")
        .await
        .unwrap();

    let verification = registry.verify("cert1").await.unwrap();
    assert!(verification.hash_match);
    assert_eq!(verification.record.name, "New Name");

    let entries = history.get_history("cert1").await.unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].record().unwrap().owner, "OwnerA");
    assert_eq!(entries[1].record().unwrap().owner, "NewOwner");
    assert_eq!(entries[2].record().unwrap().name, "New Name");
}

#[tokio::test]
async fn records_and_history_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("registry.db");

    {
        let store = Arc::new(SqliteStore::open(&path).unwrap());
        let registry = RegistryService::new(store);
        registry.register(sample_request("cert1")).await.unwrap();
        registry
            .update_field("cert1", "owner", "NewOwner")
            .await
            .unwrap();
    }

    let store = Arc::new(SqliteStore::open(&path).unwrap());
    let registry = RegistryService::new(store.clone());
    let history = HistoryReconstructor::new(store);

    let verification = registry.verify("cert1").await.unwrap();
    assert!(verification.hash_match);
    assert_eq!(verification.record.owner, "NewOwner");

    assert_eq!(history.get_history("cert1").await.unwrap().len(), 2);
}
