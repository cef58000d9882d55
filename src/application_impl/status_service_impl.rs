use crate::application_port::*;
use crate::domain_model::Collection;
use crate::domain_port::*;
use std::sync::Arc;

pub struct RealStatusService {
    cache: Arc<dyn CacheStore>,
    documents: Arc<dyn DocumentStore>,
}

impl RealStatusService {
    pub fn new(cache: Arc<dyn CacheStore>, documents: Arc<dyn DocumentStore>) -> Self {
        RealStatusService { cache, documents }
    }
}

#[async_trait::async_trait]
impl StatusService for RealStatusService {
    fn status(&self) -> StoreStatus {
        StoreStatus {
            redis: self.cache.is_alive(),
            db: self.documents.is_alive(),
        }
    }

    async fn stats(&self) -> Result<Stats, StoreError> {
        let (users, files) = tokio::try_join!(
            self.documents.count_documents(Collection::Users),
            self.documents.count_documents(Collection::Files),
        )?;
        Ok(Stats { users, files })
    }
}
