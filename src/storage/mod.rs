pub mod file_store;
pub mod kv;
pub mod memory;
