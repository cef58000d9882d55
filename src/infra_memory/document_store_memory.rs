use super::connection::SimulatedConnection;
use crate::domain_model::Collection;
use crate::domain_port::*;
use crate::liveness::LivenessFlag;
use dashmap::DashMap;

pub struct MemoryDocumentStore {
    collections: DashMap<Collection, Vec<serde_json::Value>>,
    connection: SimulatedConnection,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self {
            collections: DashMap::new(),
            connection: SimulatedConnection::new("document"),
        }
    }

    pub fn insert(&self, collection: Collection, document: serde_json::Value) {
        self.collections
            .entry(collection)
            .or_default()
            .push(document);
    }

    pub fn liveness(&self) -> LivenessFlag {
        self.connection.liveness()
    }

    pub fn disconnect(&self) {
        self.connection.drop_connection("simulated disconnect");
    }

    pub fn reconnect(&self) {
        self.connection.restore();
    }
}

impl Default for MemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl DocumentStore for MemoryDocumentStore {
    fn is_alive(&self) -> bool {
        self.connection.is_alive()
    }

    async fn count_documents(&self, collection: Collection) -> Result<u64, StoreError> {
        self.connection.check()?;
        let count = self
            .collections
            .get(&collection)
            .map(|documents| documents.len())
            .unwrap_or(0);
        Ok(count as u64)
    }
}
