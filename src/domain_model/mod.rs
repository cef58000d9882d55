mod collection;
mod session;
mod user;

pub use collection::*;
pub use session::*;
pub use user::*;
