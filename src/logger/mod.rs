//! Process-wide `tracing` setup. Installing a global subscriber cannot be
//! repeated inside one test binary, so this module is exercised by `main`
//! and `bin/session_demo.rs` rather than unit tests.

mod logger;
pub use logger::*;

pub use tracing::{debug, error, info, trace, warn};
