use super::clock::Clock;
use super::connection::SimulatedConnection;
use crate::domain_port::*;
use crate::liveness::LivenessFlag;
use chrono::{DateTime, TimeDelta, Utc};
use dashmap::DashMap;
use std::sync::Arc;

struct Entry {
    value: String,
    expires_at: DateTime<Utc>,
}

/// In-process [`CacheStore`] with Redis-like expiry.
///
/// Entries carry an absolute expiry and are checked lazily: an expired key
/// reads as absent the moment its deadline passes and is removed on that
/// read. Nothing sweeps in the background.
pub struct MemoryCacheStore {
    entries: DashMap<String, Entry>,
    clock: Arc<dyn Clock>,
    connection: SimulatedConnection,
}

impl MemoryCacheStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: DashMap::new(),
            clock,
            connection: SimulatedConnection::new("cache"),
        }
    }

    pub fn liveness(&self) -> LivenessFlag {
        self.connection.liveness()
    }

    /// Fail every call with `Unavailable` and emit an error event.
    pub fn disconnect(&self) {
        self.connection.drop_connection("simulated disconnect");
    }

    pub fn reconnect(&self) {
        self.connection.restore();
    }

    /// Remaining time to live of `key`, like Redis `TTL`.
    pub fn ttl(&self, key: &str) -> Option<TimeDelta> {
        let now = self.clock.now();
        self.entries
            .get(key)
            .map(|entry| entry.expires_at - now)
            .filter(|left| *left > TimeDelta::zero())
    }
}

#[async_trait::async_trait]
impl CacheStore for MemoryCacheStore {
    fn is_alive(&self) -> bool {
        self.connection.is_alive()
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.connection.check()?;
        let now = self.clock.now();

        if let Some(entry) = self.entries.get(key) {
            if entry.expires_at > now {
                return Ok(Some(entry.value.clone()));
            }
        }

        self.entries.remove_if(key, |_, entry| entry.expires_at <= now);
        Ok(None)
    }

    async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        ttl_secs: u64,
    ) -> Result<(), StoreError> {
        self.connection.check()?;
        if ttl_secs == 0 {
            return Err(StoreError::Backend("invalid expire time".to_owned()));
        }

        let expires_at = i64::try_from(ttl_secs)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .and_then(|ttl| self.clock.now().checked_add_signed(ttl))
            .ok_or_else(|| StoreError::Backend("invalid expire time".to_owned()))?;

        self.entries.insert(
            key.to_owned(),
            Entry {
                value: value.to_owned(),
                expires_at,
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.connection.check()?;
        self.entries.remove(key);
        Ok(())
    }
}
