use crate::domain_port::StoreError;
use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::time::{Interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionEvent {
    Connected,
    Error(String),
}

#[derive(Debug, Clone)]
pub struct EventReporter {
    tx: mpsc::UnboundedSender<ConnectionEvent>,
}

impl EventReporter {
    /// Never fails: once the monitor has stopped, events are dropped.
    pub fn report(&self, event: ConnectionEvent) {
        let _ = self.tx.send(event);
    }

    pub fn connected(&self) {
        self.report(ConnectionEvent::Connected);
    }

    pub fn error(&self, reason: impl Into<String>) {
        self.report(ConnectionEvent::Error(reason.into()));
    }
}

/// Report the outcome of a store command and pass it through unchanged.
///
/// Success means the connection is up. Only `Unavailable` errors mean it is
/// down; a `Backend` error says nothing about the connection.
pub fn observe<T>(
    reporter: &EventReporter,
    result: Result<T, StoreError>,
) -> Result<T, StoreError> {
    match &result {
        Ok(_) => reporter.connected(),
        Err(StoreError::Unavailable(reason)) => reporter.error(reason.clone()),
        Err(StoreError::Backend(_)) => {}
    }
    result
}

/// Read-only view of a store's liveness.
#[derive(Debug, Clone)]
pub struct LivenessFlag {
    rx: watch::Receiver<bool>,
}

impl LivenessFlag {
    pub fn is_alive(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolve once the flag equals `alive`. Returns false if the monitor
    /// stopped before that happened.
    pub async fn wait_for(&mut self, alive: bool) -> bool {
        self.rx.wait_for(|v| *v == alive).await.is_ok()
    }
}

pub type PingFn = Box<dyn Fn() -> BoxFuture<'static, Result<(), String>> + Send + Sync>;

struct Prober {
    interval: Duration,
    ping: PingFn,
}

impl Prober {
    fn check(&self) -> BoxFuture<'static, ConnectionEvent> {
        let ping = tokio::time::timeout(self.interval, (self.ping)());
        async move {
            match ping.await {
                Ok(Ok(())) => ConnectionEvent::Connected,
                Ok(Err(reason)) => ConnectionEvent::Error(reason),
                Err(_) => ConnectionEvent::Error("probe timed out".to_owned()),
            }
        }
        .boxed()
    }
}

pub struct LivenessMonitor {
    store: &'static str,
    events: mpsc::UnboundedReceiver<ConnectionEvent>,
    state: watch::Sender<bool>,
    prober: Option<Prober>,
}

/// Create the reporter, flag and monitor for one store.
pub fn liveness_channel(
    store: &'static str,
    initial: bool,
) -> (EventReporter, LivenessFlag, LivenessMonitor) {
    let (tx, events) = mpsc::unbounded_channel();
    let (state, rx) = watch::channel(initial);
    let monitor = LivenessMonitor {
        store,
        events,
        state,
        prober: None,
    };
    (EventReporter { tx }, LivenessFlag { rx }, monitor)
}

impl LivenessMonitor {
    /// Also ping the store every `interval`; a ping slower than `interval`
    /// counts as a failure. A zero interval disables probing.
    pub fn with_probe(mut self, interval: Duration, ping: PingFn) -> Self {
        if interval.is_zero() {
            warn!(store = %self.store, "zero probe interval, probing disabled");
            return self;
        }
        self.prober = Some(Prober { interval, ping });
        self
    }

    /// Apply events until cancelled or until every reporter is dropped.
    ///
    /// A probe in flight does not hold up events or cancellation; at most one
    /// probe runs at a time.
    pub async fn run(self, cancel: CancellationToken) {
        let LivenessMonitor {
            store,
            mut events,
            state,
            prober,
        } = self;

        let mut ticker = prober.as_ref().map(|p| {
            let mut interval = tokio::time::interval(p.interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            interval
        });

        let mut probing: Option<BoxFuture<'static, ConnectionEvent>> = None;

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    debug!(%store, "liveness monitor shutting down");
                    break;
                }
                event = events.recv() => match event {
                    Some(event) => apply(store, &state, event),
                    None => break,
                },
                event = in_flight(&mut probing) => {
                    probing = None;
                    apply(store, &state, event);
                }
                _ = next_tick(&mut ticker), if probing.is_none() => {
                    probing = prober.as_ref().map(Prober::check);
                }
            }
        }
    }
}

async fn in_flight(
    probing: &mut Option<BoxFuture<'static, ConnectionEvent>>,
) -> ConnectionEvent {
    match probing {
        Some(probe) => probe.await,
        None => std::future::pending().await,
    }
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending().await,
    }
}

fn apply(store: &'static str, state: &watch::Sender<bool>, event: ConnectionEvent) {
    let alive = event == ConnectionEvent::Connected;
    let was_alive = state.send_replace(alive);
    match event {
        ConnectionEvent::Connected if !was_alive => info!(%store, "connection established"),
        ConnectionEvent::Error(reason) if was_alive => {
            warn!(%store, %reason, "connection lost")
        }
        ConnectionEvent::Error(reason) => debug!(%store, %reason, "connection still down"),
        ConnectionEvent::Connected => {}
    }
}
