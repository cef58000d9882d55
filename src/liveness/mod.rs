//! Connection health tracking for the backing stores.
//!
//! Each store owns one [`LivenessMonitor`] task, the only writer of its
//! liveness flag. Adapters and probes push [`ConnectionEvent`]s through an
//! [`EventReporter`]; everyone else reads through a [`LivenessFlag`].

mod monitor;
pub use monitor::*;
