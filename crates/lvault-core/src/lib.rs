//! Links Vault Core Library
//!
//! This crate provides the core functionality for Links Vault, a small
//! bookmark manager: named URL entries with optional descriptions and tags,
//! kept in a local key-value store.
//!
//! # Architecture
//!
//! - **LinkStore**: the in-memory list of links, source of truth for a session
//! - **KeyValueStore**: the persistent backing store (one JSON blob per key)
//!
//! Every successful mutation writes the whole collection back to its key.
//!
//! # Quick Start
//!
//! ```text
//! let backend = FileStore::new(config.data_dir.clone());
//! let mut store = LinkStore::load(backend, &config.storage_key);
//!
//! // Add a link
//! let input = LinkInput::new("Rust", "https://rust-lang.org");
//! store.create(&input)?;
//!
//! // Query links
//! let hits = store.search("rust");
//! ```
//!
//! # Modules
//!
//! - `store`: `LinkStore`, the main entry point
//! - `models`: link records and form input
//! - `search`: case-insensitive matching over records
//! - `display`: host-only URL formatting and browser URLs
//! - `storage`: key-value backends (file, memory)
//! - `config`: application configuration

pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod search;
pub mod storage;
pub mod store;

pub use config::Config;
pub use display::{browser_url, format_display_url};
pub use error::ValidationError;
pub use models::{parse_tags, LinkInput, LinkRecord};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError, StorageResult};
pub use store::{DeleteOutcome, LinkStore, DEFAULT_STORAGE_KEY};
