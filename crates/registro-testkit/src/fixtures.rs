//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::sync::Arc;

use registro::{HistoryReconstructor, RegisterRequest, RegistryService, Result};
use registro_core::CertificateRecord;
use registro_store::MemoryStore;

/// A registry wired over a shared in-memory store, with a history
/// reconstructor on the same store.
pub struct TestFixture {
    pub store: Arc<MemoryStore>,
    pub registry: RegistryService<MemoryStore>,
    pub history: HistoryReconstructor<MemoryStore>,
}

impl TestFixture {
    /// Create a fresh fixture.
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            registry: RegistryService::new(store.clone()),
            history: HistoryReconstructor::new(store.clone()),
            store,
        }
    }

    /// Register the sample certificate under the given id.
    pub async fn register_sample(&self, id: &str) -> Result<CertificateRecord> {
        self.registry.register(sample_request(id)).await
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// The canonical sample register request used across tests.
pub fn sample_request(id: &str) -> RegisterRequest {
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
