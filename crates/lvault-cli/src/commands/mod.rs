//! Command handlers

pub mod config;
pub mod link;

use lvault_core::{Config, FileStore, LinkStore};

use crate::output::Output;

/// The store every command works on
pub type VaultStore = LinkStore<FileStore>;

/// Load the link collection from the configured data directory
pub fn open_store(config: &Config) -> VaultStore {
    LinkStore::load(
        FileStore::new(config.data_dir.clone()),
        config.storage_key.clone(),
    )
}

/// Warn about a write that failed after a successful mutation
pub fn report_save_error(store: &mut VaultStore, output: &Output) {
    if let Some(e) = store.take_save_error() {
        output.warning(&format!("Changes to '{}' were not saved: {}", store.key(), e));
        if let Some(hint) = e.recovery_suggestion() {
            output.warning(hint);
        }
    }
}
