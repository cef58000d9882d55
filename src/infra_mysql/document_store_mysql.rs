use crate::domain_model::Collection;
use crate::domain_port::*;
use crate::liveness::*;
use futures_util::FutureExt;
use sqlx::MySqlPool;
use std::time::Duration;

/// Document counts backed by one MySQL table per collection.
///
/// The pool is expected to connect lazily, so the store starts out not alive
/// and only flips once a probe or a query reaches the server.
pub struct MySqlDocumentStore {
    pool: MySqlPool,
    reporter: EventReporter,
    liveness: LivenessFlag,
}

impl MySqlDocumentStore {
    pub fn new(pool: MySqlPool, probe_interval: Duration) -> (Self, LivenessMonitor) {
        let (reporter, liveness, monitor) = liveness_channel("mysql", false);

        let probe_pool = pool.clone();
        let monitor = monitor.with_probe(
            probe_interval,
            Box::new(move || {
                let pool = probe_pool.clone();
                async move {
                    sqlx::query("SELECT 1")
                        .execute(&pool)
                        .await
                        .map_err(|e| e.to_string())?;
                    Ok::<(), String>(())
                }
                .boxed()
            }),
        );

        let store = MySqlDocumentStore {
            pool,
            reporter,
            liveness,
        };
        (store, monitor)
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn count_sql(collection: Collection) -> &'static str {
    match collection {
        Collection::Users => "SELECT COUNT(*) FROM users",
        Collection::Files => "SELECT COUNT(*) FROM files",
    }
}

fn map_sqlx_error(e: sqlx::Error) -> StoreError {
    match &e {
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => StoreError::Unavailable(e.to_string()),
        _ => StoreError::Backend(e.to_string()),
    }
}

#[async_trait::async_trait]
impl DocumentStore for MySqlDocumentStore {
    fn is_alive(&self) -> bool {
        self.liveness.is_alive()
    }

    async fn count_documents(&self, collection: Collection) -> Result<u64, StoreError> {
        let result: Result<i64, sqlx::Error> = sqlx::query_scalar(count_sql(collection))
            .fetch_one(&self.pool)
            .await;
        let count = observe(&self.reporter, result.map_err(map_sqlx_error))?;

        u64::try_from(count).map_err(|e| StoreError::Backend(format!("count {collection}: {e}")))
    }
}
