use crate::application_impl::*;
use crate::application_port::*;
use crate::domain_port::*;
use crate::infra_memory::*;
use crate::infra_mysql::*;
use crate::infra_redis::*;
use crate::logger::*;
use crate::settings::Settings;
use anyhow::anyhow;
use sqlx::mysql::MySqlPoolOptions;
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

pub struct Server {
    pub auth_gate: Arc<dyn AuthGate>,
    pub session_service: Arc<dyn SessionService>,
    pub status_service: Arc<dyn StatusService>,
    monitor_handles: Mutex<Vec<JoinHandle<()>>>,
    cancel: CancellationToken,
    mysql: Option<Arc<MySqlDocumentStore>>,
}

impl Server {
    /// Server over ready-made services, without background tasks.
    pub fn new(
        auth_gate: Arc<dyn AuthGate>,
        session_service: Arc<dyn SessionService>,
        status_service: Arc<dyn StatusService>,
    ) -> Self {
        Self {
            auth_gate,
            session_service,
            status_service,
            monitor_handles: Mutex::new(Vec::new()),
            cancel: CancellationToken::new(),
            mysql: None,
        }
    }

    pub async fn try_new(settings: &Settings) -> anyhow::Result<Self> {
        let cancel = CancellationToken::new();
        let mut monitor_handles = Vec::new();

        let cache: Arc<dyn CacheStore> = match settings.cache.backend.as_str() {
            "memory" => Arc::new(MemoryCacheStore::new(Arc::new(SystemClock))),
            "redis" => {
                let redis_client = redis::Client::open(settings.cache.url())?;
                let redis_manager = redis_client.get_connection_manager().await?;
                let (store, monitor) =
                    RedisCacheStore::new(redis_manager, settings.cache.probe_interval());
                monitor_handles.push(tokio::spawn(monitor.run(cancel.clone())));
                Arc::new(store)
            }
            other => return Err(anyhow!("Unknown cache backend: {}", other)),
        };

        let mut mysql = None;
        let documents: Arc<dyn DocumentStore> = match settings.document.backend.as_str() {
            "memory" => Arc::new(MemoryDocumentStore::new()),
            "mysql" => {
                let pool = MySqlPoolOptions::new()
                    .acquire_timeout(settings.document.probe_interval())
                    .connect_lazy(&settings.document.dsn())?;
                let (store, monitor) =
                    MySqlDocumentStore::new(pool, settings.document.probe_interval());
                monitor_handles.push(tokio::spawn(monitor.run(cancel.clone())));
                let store = Arc::new(store);
                let documents: Arc<dyn DocumentStore> = store.clone();
                mysql = Some(store);
                documents
            }
            other => return Err(anyhow!("Unknown document backend: {}", other)),
        };

        let auth_gate = select_auth_gate(&settings.auth.backend)?;

        let session_service: Arc<dyn SessionService> =
            Arc::new(RealSessionService::new(cache.clone()));
        let status_service: Arc<dyn StatusService> =
            Arc::new(RealStatusService::new(cache, documents));

        info!(
            cache = %settings.cache.backend,
            document = %settings.document.backend,
            "server started"
        );

        Ok(Self {
            auth_gate,
            session_service,
            status_service,
            monitor_handles: Mutex::new(monitor_handles),
            cancel,
            mysql,
        })
    }

    pub async fn shutdown(&self) {
        info!("server shutting down...");

        self.cancel.cancel();

        let handles = match self.monitor_handles.lock() {
            Ok(mut lock) => std::mem::take(&mut *lock),
            Err(_) => Vec::new(),
        };
        for handle in handles {
            let r = handle.await;
            info!("liveness monitor dropped: {:?}", r);
        }

        if let Some(mysql) = &self.mysql {
            mysql.close().await;
        }
    }
}

fn select_auth_gate(backend: &str) -> anyhow::Result<Arc<dyn AuthGate>> {
    match backend {
        "fake" => {
            warn!("fake auth backend selected: any non-empty email and password is accepted");
            Ok(Arc::new(FakeAuthGate::new()))
        }
        other => Err(anyhow!("Unknown auth backend: {}", other)),
    }
}
