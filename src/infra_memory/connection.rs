use crate::domain_port::StoreError;
use crate::liveness::*;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio_util::sync::CancellationToken;

/// Connection state of an in-memory store, driven by the test that owns it.
///
/// Must be created inside a tokio runtime: it spawns the liveness monitor,
/// which stops once the connection is dropped.
pub(super) struct SimulatedConnection {
    up: AtomicBool,
    reporter: EventReporter,
    liveness: LivenessFlag,
}

impl SimulatedConnection {
    pub(super) fn new(store: &'static str) -> Self {
        let (reporter, liveness, monitor) = liveness_channel(store, true);
        tokio::spawn(monitor.run(CancellationToken::new()));
        Self {
            up: AtomicBool::new(true),
            reporter,
            liveness,
        }
    }

    pub(super) fn is_alive(&self) -> bool {
        self.liveness.is_alive()
    }

    pub(super) fn liveness(&self) -> LivenessFlag {
        self.liveness.clone()
    }

    pub(super) fn drop_connection(&self, reason: &str) {
        self.up.store(false, Ordering::SeqCst);
        self.reporter.error(reason);
    }

    pub(super) fn restore(&self) {
        self.up.store(true, Ordering::SeqCst);
        self.reporter.connected();
    }

    pub(super) fn check(&self) -> Result<(), StoreError> {
        if self.up.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Unavailable("connection is down".to_owned()))
        }
    }
}
