mod auth_gate_fake;
mod session_service_impl;
mod status_service_impl;

pub use auth_gate_fake::*;
pub use session_service_impl::*;
pub use status_service_impl::*;
