use crate::domain_port::StoreError;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StoreStatus {
    pub redis: bool,
    pub db: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub users: u64,
    pub files: u64,
}

#[async_trait::async_trait]
pub trait StatusService: Send + Sync {
    fn status(&self) -> StoreStatus;
    async fn stats(&self) -> Result<Stats, StoreError>;
}
