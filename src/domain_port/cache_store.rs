use super::StoreError;

/// TTL-capable key-value store holding ephemeral data.
///
/// Expiry is owned by the store: once `ttl_secs` have elapsed since a write,
/// `get` reports the key as absent without any caller-side cleanup.
#[async_trait::async_trait]
pub trait CacheStore: Send + Sync {
    /// Last observed connection health. Never blocks.
    fn is_alive(&self) -> bool;

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write `value` under `key`, replacing any previous value and expiry.
    async fn set_with_expiry(&self, key: &str, value: &str, ttl_secs: u64)
    -> Result<(), StoreError>;

    /// Remove `key`. Removing a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<(), StoreError>;
}
