//! Channel Index over the global catalog
//!
//! Every catalog name and alternate name is registered under its lowercase
//! form. When two entries claim the same key the later entry in catalog order
//! wins; collisions are counted but never rejected.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::errors::{AppResult, CatalogError};
use crate::models::ChannelCatalogEntry;

/// Case-insensitive exact-match lookup from channel name to catalog entry
#[derive(Debug, Clone, Default)]
pub struct ChannelIndex {
    entries: Vec<ChannelCatalogEntry>,
    keys: HashMap<String, usize>,
    collisions: usize,
}

impl ChannelIndex {
    /// Build the index from catalog entries in catalog order
    ///
    /// Fails on the first entry without a `name`.
    pub fn build(catalog: Vec<ChannelCatalogEntry>) -> AppResult<Self> {
        let mut index = Self {
            entries: Vec::with_capacity(catalog.len()),
            keys: HashMap::with_capacity(catalog.len()),
            collisions: 0,
        };

        for (position, entry) in catalog.into_iter().enumerate() {
            let Some(name) = entry.name.as_deref() else {
                return Err(CatalogError::MissingName { position }.into());
            };

            let slot = index.entries.len();
            index.register(name, slot);
            for alt_name in &entry.alt_names {
                index.register(alt_name, slot);
            }
            index.entries.push(entry);
        }

        info!(
            "Channel index built: catalog_entries={} keys={} collisions={}",
            index.entries.len(),
            index.keys.len(),
            index.collisions
        );

        Ok(index)
    }

    fn register(&mut self, name: &str, slot: usize) {
        let key = name.to_lowercase();
        if let Some(previous) = self.keys.insert(key, slot) {
            if previous != slot {
                self.collisions += 1;
                debug!(
                    "Catalog key '{}' reassigned from entry {} to entry {}",
                    name, previous, slot
                );
            }
        }
    }

    /// Look up a channel by name, ignoring case
    pub fn lookup(&self, name: &str) -> Option<&ChannelCatalogEntry> {
        self.keys
            .get(&name.to_lowercase())
            .map(|&slot| &self.entries[slot])
    }

    /// Number of distinct lookup keys
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Number of catalog entries indexed
    pub fn catalog_len(&self) -> usize {
        self.entries.len()
    }

    /// Keys that were overwritten by a later catalog entry
    pub fn collisions(&self) -> usize {
        self.collisions
    }
}
