//! The user's saved titles.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::media::{MediaItem, MediaKey, MediaType};
use crate::store::PersistentStore;

/// Store key holding the serialized watchlist.
pub const WATCHLIST_KEY: &str = "cineflix-myList";

/// Ordered, duplicate-free list of saved titles.
///
/// Entries are unique by [`MediaKey`] and keep insertion order. Every
/// mutation re-saves the whole list.
#[derive(Debug)]
pub struct Watchlist {
    store: PersistentStore,
    entries: Vec<MediaItem>,
}

impl Watchlist {
    /// Load the watchlist from the store.
    ///
    /// A missing or corrupt value yields an empty list. Duplicate entries
    /// left by older writers are collapsed to their first occurrence.
    pub fn load(store: PersistentStore) -> Self {
        let stored: Vec<MediaItem> = store.get(WATCHLIST_KEY, Vec::new());
        let mut seen = HashSet::new();
        let entries: Vec<MediaItem> = stored
            .into_iter()
            .filter(|item| seen.insert(item.key()))
            .collect();
        debug!("Loaded watchlist with {} entries", entries.len());
        Self { store, entries }
    }

    pub fn entries(&self) -> &[MediaItem] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: MediaKey) -> bool {
        self.entries.iter().any(|item| item.key() == key)
    }

    /// Append an item. Returns false (after re-saving) if it was already present.
    pub fn add(&mut self, item: MediaItem) -> bool {
        let added = if self.contains(item.key()) {
            false
        } else {
            info!("Added {} to watchlist", item.key());
            self.entries.push(item);
            true
        };
        self.save();
        added
    }

    /// Remove an item. Returns false if it was not present.
    pub fn remove(&mut self, key: MediaKey) -> bool {
        let before = self.entries.len();
        self.entries.retain(|item| item.key() != key);
        if self.entries.len() == before {
            return false;
        }
        info!("Removed {} from watchlist", key);
        self.save();
        true
    }

    /// Add if absent, remove if present. Returns whether the item is now saved.
    pub fn toggle(&mut self, item: MediaItem) -> bool {
        if self.remove(item.key()) {
            false
        } else {
            self.add(item)
        }
    }

    /// Saved movies, in insertion order.
    pub fn movies(&self) -> Vec<&MediaItem> {
        self.of_type(MediaType::Movie)
    }

    /// Saved shows, in insertion order.
    pub fn shows(&self) -> Vec<&MediaItem> {
        self.of_type(MediaType::Tv)
    }

    fn of_type(&self, media_type: MediaType) -> Vec<&MediaItem> {
        self.entries
            .iter()
            .filter(|item| item.media_type() == media_type)
            .collect()
    }

    fn save(&self) {
        self.store.set(WATCHLIST_KEY, &self.entries);
    }
}
