//! File-backed key-value store
//!
//! Each key is a file `<key>.json` in the data directory. Writes go through
//! a temporary file that is synced and renamed over the target, so a crash
//! never leaves a half-written value behind.
//!
//! Storage location: `~/.local/share/lvault/` (configurable via `Config`)

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::error::{StorageError, StorageResult};
use super::KeyValueStore;

/// Key-value store keeping one file per key in a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir` (created lazily on first write)
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the file backing `key`
    pub fn path_for(&self, key: &str) -> StorageResult<PathBuf> {
        check_key(key)?;
        Ok(entry_path(&self.dir, key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.path_for(key)?;

        match fs::read_to_string(&path) {
            Ok(content) => {
                debug!("Read {} bytes from {:?}", content.len(), path);
                Ok(Some(content))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::from_read_io(e, path)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        atomic_write(&path, value.as_bytes())?;
        debug!("Wrote {} bytes to {:?}", value.len(), path);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;

        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::from_io(e, path)),
        }
    }
}

/// File path for a key inside `dir`
pub(crate) fn entry_path(dir: &Path, key: &str) -> PathBuf {
    dir.join(format!("{}.json", key))
}

/// Keys become file names, so they must stay inside the data directory
fn check_key(key: &str) -> StorageResult<()> {
    let reason = if key.is_empty() {
        Some("key is empty")
    } else if key == "." || key == ".." {
        Some("key is a relative path component")
    } else if !key
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
    {
        Some("key contains characters not allowed in a file name")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(StorageError::InvalidKey {
            key: key.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

/// Write data to a file atomically
///
/// 1. Write to a temporary file in the same directory
/// 2. Sync the file to disk
/// 3. Rename the temp file to the target path
fn atomic_write(path: &Path, data: &[u8]) -> StorageResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| StorageError::CreateDirectory {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    // Same directory as the target so the rename stays on one filesystem
    let temp_path = path.with_extension("json.tmp");

    let mut file =
        File::create(&temp_path).map_err(|e| StorageError::from_io(e, temp_path.clone()))?;

    file.write_all(data)
        .map_err(|e| StorageError::from_io(e, temp_path.clone()))?;

    file.sync_all()
        .map_err(|e| StorageError::from_io(e, temp_path.clone()))?;

    fs::rename(&temp_path, path).map_err(|source| StorageError::AtomicWriteFailed {
        from: temp_path.clone(),
        to: path.to_path_buf(),
        source,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_set_and_get() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FileStore::new(temp_dir.path());

        // Initially nothing stored
        assert!(store.get("linksVault").unwrap().is_none());

        store.set("linksVault", "[]").unwrap();
        assert_eq!(store.get("linksVault").unwrap().as_deref(), Some("[]"));
        assert!(temp_dir.path().join("linksVault.json").exists());
    }

    #[test]
    fn test_set_replaces_value() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FileStore::new(temp_dir.path());

        store.set("k", "first value, longer").unwrap();
        store.set("k", "second").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn test_remove() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FileStore::new(temp_dir.path());

        store.set("k", "v").unwrap();
        store.remove("k").unwrap();
        assert!(store.get("k").unwrap().is_none());

        // Removing again is fine
        store.remove("k").unwrap();
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FileStore::new(temp_dir.path());

        store.set("k", "v").unwrap();
        assert!(!temp_dir.path().join("k.json.tmp").exists());
    }

    #[test]
    fn test_creates_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");
        let mut store = FileStore::new(&nested);

        store.set("k", "test data").unwrap();

        let content = fs::read_to_string(nested.join("k.json")).unwrap();
        assert_eq!(content, "test data");
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FileStore::new(temp_dir.path());

        for key in ["", ".", "..", "../escape", "a/b", "a b"] {
            let err = store.set(key, "v").unwrap_err();
            assert!(matches!(err, StorageError::InvalidKey { .. }), "key {:?}", key);
        }
    }

    #[test]
    fn test_unreadable_value_is_read_error() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());

        // Not valid UTF-8
        fs::write(temp_dir.path().join("k.json"), [0xff, 0xfe, 0x00]).unwrap();
        let err = store.get("k").unwrap_err();
        assert!(matches!(err, StorageError::ReadError { .. }));
    }
}
