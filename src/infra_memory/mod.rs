mod cache_store_memory;
mod clock;
mod connection;
mod document_store_memory;

pub use cache_store_memory::*;
pub use clock::*;
pub use document_store_memory::*;
