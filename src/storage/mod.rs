mod kv_store;

pub use kv_store::{FileStore, KeyValueStore, MemoryStore, Result, StorageError};
