//! Link store
//!
//! The `LinkStore` owns the in-memory list of links and keeps a key-value
//! backend in step with it:
//!
//! - the list is read once, when the store is constructed with [`LinkStore::load`]
//! - the whole list is written back after every successful mutation
//!
//! Since `load` is the only constructor, a store can never write before its
//! persisted state has been read, so an unread store is never clobbered.
//!
//! ## Usage
//!
//! ```ignore
//! let mut store = LinkStore::load(FileStore::new(&config.data_dir), &config.storage_key);
//!
//! store.create(&LinkInput::new("My Site", "example.com"))?;
//! let hits = store.search("site");
//! ```
//!
//! ## Failures
//!
//! Nothing here is fatal. Unreadable or corrupt data loads as an empty list.
//! A failed write after a mutation is logged and kept for
//! [`LinkStore::take_save_error`]; memory stays authoritative.

use chrono::{DateTime, TimeZone, Utc};
use tracing::{debug, info, warn};

use crate::error::ValidationError;
use crate::models::{LinkInput, LinkRecord};
use crate::search;
use crate::storage::{KeyValueStore, StorageError, StorageResult};

/// Storage key used by the browser version of the vault
pub const DEFAULT_STORAGE_KEY: &str = "linksVault";

/// Result of a delete request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The link was removed
    Deleted(LinkRecord),
    /// The confirmation was declined; nothing changed
    Cancelled,
    /// No link has that id; nothing changed
    NotFound,
}

/// In-memory link collection synchronized with a key-value backend
pub struct LinkStore<S: KeyValueStore> {
    /// Persistent backend
    backend: S,
    /// Key the collection is stored under
    key: String,
    /// Links, newest first
    links: Vec<LinkRecord>,
    /// Most recent write failure from a mutation, not yet reported
    save_error: Option<StorageError>,
}

impl<S: KeyValueStore> LinkStore<S> {
    /// Read the collection stored under `key` and build a store around it
    ///
    /// A missing value, an empty or `null` value, an unreadable backend, and
    /// a value that is not a list of well-formed links all produce an empty
    /// store. The last two are logged; the bad value is left in place until
    /// the next save replaces it.
    pub fn load(backend: S, key: impl Into<String>) -> Self {
        let key = key.into();

        let links = match read_links(&backend, &key) {
            Ok(links) => {
                debug!("Loaded {} link(s) from '{}'", links.len(), key);
                links
            }
            Err(e) => {
                warn!("Could not load links, starting empty: {}", e);
                Vec::new()
            }
        };

        Self {
            backend,
            key,
            links,
            save_error: None,
        }
    }

    /// Write the whole collection to the backend, replacing what was there
    pub fn save(&mut self) -> StorageResult<()> {
        let json = serde_json::to_string(&self.links)?;
        self.backend.set(&self.key, &json)?;
        debug!("Saved {} link(s) to '{}'", self.links.len(), self.key);
        Ok(())
    }

    /// Save after a mutation; failures are logged and remembered, not returned
    fn persist(&mut self) {
        if let Err(e) = self.save() {
            warn!("Failed to save links to '{}': {}", self.key, e);
            self.save_error = Some(e);
        }
    }

    /// The last save failure since the previous call, if any
    pub fn take_save_error(&mut self) -> Option<StorageError> {
        self.save_error.take()
    }

    // ==================== Mutations ====================

    /// Add a new link at the front of the collection
    pub fn create(&mut self, input: &LinkInput) -> Result<&LinkRecord, ValidationError> {
        let fields = input.validate()?;

        let now = Utc::now().timestamp_millis();
        let record = LinkRecord::new(self.next_id(now), timestamp(now), fields);
        info!("Created link {} ({})", record.id, record.url);

        self.links.insert(0, record);
        self.persist();
        Ok(&self.links[0])
    }

    /// Replace the editable fields of link `id`
    ///
    /// Validation runs first. Returns `Ok(None)` when no link has that id.
    /// The link keeps its id, creation time, and position.
    pub fn update(
        &mut self,
        id: i64,
        input: &LinkInput,
    ) -> Result<Option<&LinkRecord>, ValidationError> {
        let fields = input.validate()?;

        let Some(pos) = self.position(id) else {
            debug!("Update skipped, no link with id {}", id);
            return Ok(None);
        };

        self.links[pos].apply(fields);
        info!("Updated link {}", id);

        self.persist();
        Ok(Some(&self.links[pos]))
    }

    /// Remove link `id` once `confirm` agrees
    ///
    /// `confirm` sees the link about to be removed and is not called at all
    /// when the id is unknown.
    pub fn delete<F>(&mut self, id: i64, confirm: F) -> DeleteOutcome
    where
        F: FnOnce(&LinkRecord) -> bool,
    {
        let Some(pos) = self.position(id) else {
            debug!("Delete skipped, no link with id {}", id);
            return DeleteOutcome::NotFound;
        };

        if !confirm(&self.links[pos]) {
            return DeleteOutcome::Cancelled;
        }

        let removed = self.links.remove(pos);
        info!("Deleted link {}", id);

        self.persist();
        DeleteOutcome::Deleted(removed)
    }

    // ==================== Queries ====================

    /// Links matching `term` case-insensitively, in collection order
    ///
    /// An empty term returns every link.
    pub fn search(&self, term: &str) -> Vec<&LinkRecord> {
        search::filter(&self.links, term)
    }

    /// All links, newest first
    pub fn links(&self) -> &[LinkRecord] {
        &self.links
    }

    /// Get a link by id
    pub fn get(&self, id: i64) -> Option<&LinkRecord> {
        self.links.iter().find(|l| l.id == id)
    }

    /// Number of links
    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// The storage key
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The backend
    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Give the backend back, dropping the in-memory collection
    pub fn into_backend(self) -> S {
        self.backend
    }

    fn position(&self, id: i64) -> Option<usize> {
        self.links.iter().position(|l| l.id == id)
    }

    /// Wall-clock milliseconds, bumped past the largest id in use
    ///
    /// When the largest id is already `i64::MAX` there is nothing past it,
    /// so the first unused id from `now_ms` on is taken instead.
    fn next_id(&self, now_ms: i64) -> i64 {
        match self.links.iter().map(|l| l.id).max() {
            Some(max) if max >= now_ms => max.checked_add(1).unwrap_or_else(|| {
                warn!("Link ids exhausted past {}, reusing a free id", max);
                self.free_id(now_ms)
            }),
            _ => now_ms,
        }
    }

    fn free_id(&self, from: i64) -> i64 {
        let from = from.max(0);
        (from..=i64::MAX)
            .chain((0..from).rev())
            .find(|id| self.position(*id).is_none())
            .unwrap_or(from)
    }
}

/// Decode the stored collection
///
/// Empty, `null`, and `undefined` values (what a browser leaves behind for
/// an unset state) count as an empty list.
fn read_links<S: KeyValueStore>(backend: &S, key: &str) -> StorageResult<Vec<LinkRecord>> {
    let Some(raw) = backend.get(key)? else {
        return Ok(Vec::new());
    };

    let raw = raw.trim();
    if raw.is_empty() || raw == "null" || raw == "undefined" {
        return Ok(Vec::new());
    }

    serde_json::from_str(raw).map_err(|e| StorageError::CorruptValue {
        key: key.to_string(),
        details: e.to_string(),
    })
}

fn timestamp(millis: i64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(millis)
        .single()
        .unwrap_or_else(Utc::now)
}
