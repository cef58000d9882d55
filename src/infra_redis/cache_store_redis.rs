use crate::domain_port::*;
use crate::liveness::*;
use futures_util::FutureExt;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, RedisError};
use std::time::Duration;

pub struct RedisCacheStore {
    conn: ConnectionManager,
    reporter: EventReporter,
    liveness: LivenessFlag,
}

impl RedisCacheStore {
    /// Wrap an established connection. The returned monitor must be spawned
    /// for the liveness flag to move.
    pub fn new(conn: ConnectionManager, probe_interval: Duration) -> (Self, LivenessMonitor) {
        let (reporter, liveness, monitor) = liveness_channel("redis", true);

        let probe_conn = conn.clone();
        let monitor = monitor.with_probe(
            probe_interval,
            Box::new(move || {
                let mut conn = probe_conn.clone();
                async move {
                    let _: String = redis::cmd("PING")
                        .query_async(&mut conn)
                        .await
                        .map_err(|e| e.to_string())?;
                    Ok::<(), String>(())
                }
                .boxed()
            }),
        );

        let store = RedisCacheStore {
            conn,
            reporter,
            liveness,
        };
        (store, monitor)
    }
}

fn map_redis_error(e: RedisError) -> StoreError {
    if e.is_io_error()
        || e.is_connection_dropped()
        || e.is_connection_refusal()
        || e.is_timeout()
        || e.is_unrecoverable_error()
    {
        StoreError::Unavailable(e.to_string())
    } else {
        StoreError::Backend(e.to_string())
    }
}

#[async_trait::async_trait]
impl CacheStore for RedisCacheStore {
    fn is_alive(&self) -> bool {
        self.liveness.is_alive()
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.conn.clone();
        let result: Result<Option<String>, RedisError> = conn.get(key).await;
        observe(&self.reporter, result.map_err(map_redis_error))
    }

    async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        ttl_secs: u64,
    ) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        let result: Result<(), RedisError> = conn.set_ex(key, value, ttl_secs).await;
        observe(&self.reporter, result.map_err(map_redis_error))
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        let result: Result<(), RedisError> = conn.del(key).await;
        observe(&self.reporter, result.map_err(map_redis_error))
    }
}
