//! Storage layer
//!
//! A minimal string key-value store standing in for the browser's local
//! storage. The vault keeps its whole collection as one JSON blob under a
//! single key.
//!
//! ## Backends
//!
//! - **FileStore**: one file per key in the data directory, atomic writes
//! - **MemoryStore**: in-process map, for tests and throwaway sessions

pub mod error;
pub mod file;
pub mod memory;

pub use error::{StorageError, StorageResult};
pub use file::FileStore;
pub use memory::MemoryStore;

/// A synchronous string key-value store
pub trait KeyValueStore {
    /// Read the value under `key`, `None` if it was never written
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Write `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove `key`; removing a missing key is not an error
    fn remove(&mut self, key: &str) -> StorageResult<()>;
}
