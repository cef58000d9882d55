mod cache_store;
mod document_store;
mod store_error;

pub use cache_store::*;
pub use document_store::*;
pub use store_error::*;
