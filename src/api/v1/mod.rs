mod error;
mod handler;
mod router;

pub use error::recover_error;
pub use router::{TOKEN_HEADER, routes};
