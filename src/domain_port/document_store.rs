use super::StoreError;
use crate::domain_model::Collection;

#[async_trait::async_trait]
pub trait DocumentStore: Send + Sync {
    /// Last observed connection health. Never blocks.
    fn is_alive(&self) -> bool;

    /// Fresh document count of `collection`; nothing is cached.
    async fn count_documents(&self, collection: Collection) -> Result<u64, StoreError>;
}
