mod document_store_mysql;

pub use document_store_mysql::*;
