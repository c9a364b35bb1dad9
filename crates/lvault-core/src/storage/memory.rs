//! In-memory key-value store

use std::collections::HashMap;

use super::error::{StorageError, StorageResult};
use super::KeyValueStore;

/// Key-value store held in a `HashMap`
///
/// An optional per-value size limit mimics the quota of browser storage,
/// which is the one way a write to it can fail.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject writes whose value is larger than `limit` bytes
    pub fn with_quota(limit: usize) -> Self {
        Self {
            entries: HashMap::new(),
            quota: Some(limit),
        }
    }

    /// Seed a value directly, bypassing the quota
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        if let Some(limit) = self.quota {
            if value.len() > limit {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    size: value.len(),
                    limit,
                });
            }
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}
