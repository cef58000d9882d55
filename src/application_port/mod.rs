mod auth_gate;
mod session_service;
mod status_service;

pub use auth_gate::*;
pub use session_service::*;
pub use status_service::*;
