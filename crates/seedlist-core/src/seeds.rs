//! Seed model: the artists and tracks a recommendation request is biased by.
//!
//! Each kind has its own ordered list.  A list holds at most
//! [`MAX_SEEDS_PER_KIND`] entries and never two entries with the same id.
//! The capacity check runs before the duplicate check, so re-adding an id
//! that is already present in a full list still reports [`SeedError::Full`].

use thiserror::Error;

use crate::models::{ItemKind, SearchResultItem};

pub const MAX_SEEDS_PER_KIND: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedItem {
    pub id: String,
    pub label: String,
    pub kind: ItemKind,
}

impl From<&SearchResultItem> for SeedItem {
    fn from(item: &SearchResultItem) -> Self {
        Self {
            id: item.id.clone(),
            label: item.label(),
            kind: item.kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeedError {
    #[error("Max of {max} items per seed")]
    Full { kind: ItemKind, max: usize },
}

/// Result of a successful `add`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedAdded {
    Added,
    /// The id was already in the list; nothing changed.
    AlreadyPresent,
}

#[derive(Debug, Clone)]
pub struct SeedList {
    kind: ItemKind,
    items: Vec<SeedItem>,
}

impl SeedList {
    pub fn new(kind: ItemKind) -> Self {
        Self {
            kind,
            items: Vec::with_capacity(MAX_SEEDS_PER_KIND),
        }
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    pub fn add(&mut self, item: SeedItem) -> Result<SeedAdded, SeedError> {
        debug_assert_eq!(item.kind, self.kind);
        if self.is_full() {
            return Err(SeedError::Full {
                kind: self.kind,
                max: MAX_SEEDS_PER_KIND,
            });
        }
        if self.contains(&item.id) {
            return Ok(SeedAdded::AlreadyPresent);
        }
        self.items.push(item);
        Ok(SeedAdded::Added)
    }

    pub fn remove(&mut self, id: &str) -> Option<SeedItem> {
        let pos = self.items.iter().position(|s| s.id == id)?;
        Some(self.items.remove(pos))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|s| s.id == id)
    }

    pub fn ids(&self) -> Vec<&str> {
        self.items.iter().map(|s| s.id.as_str()).collect()
    }

    /// Comma-joined ids, the form `/rec` expects.
    pub fn joined_ids(&self) -> String {
        self.ids().join(",")
    }

    pub fn items(&self) -> &[SeedItem] {
        &self.items
    }

    pub fn get(&self, idx: usize) -> Option<&SeedItem> {
        self.items.get(idx)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= MAX_SEEDS_PER_KIND
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

/// Both seed lists.
#[derive(Debug, Clone)]
pub struct Seeds {
    artists: SeedList,
    tracks: SeedList,
}

impl Seeds {
    pub fn new() -> Self {
        Self {
            artists: SeedList::new(ItemKind::Artist),
            tracks: SeedList::new(ItemKind::Track),
        }
    }

    pub fn list(&self, kind: ItemKind) -> &SeedList {
        match kind {
            ItemKind::Artist => &self.artists,
            ItemKind::Track => &self.tracks,
        }
    }

    fn list_mut(&mut self, kind: ItemKind) -> &mut SeedList {
        match kind {
            ItemKind::Artist => &mut self.artists,
            ItemKind::Track => &mut self.tracks,
        }
    }

    pub fn add(&mut self, item: SeedItem) -> Result<SeedAdded, SeedError> {
        self.list_mut(item.kind).add(item)
    }

    pub fn remove(&mut self, kind: ItemKind, id: &str) -> Option<SeedItem> {
        self.list_mut(kind).remove(id)
    }

    /// True when either list has at least one seed.
    pub fn has_seeds(&self) -> bool {
        !self.artists.is_empty() || !self.tracks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.artists.len() + self.tracks.len()
    }

    pub fn clear(&mut self) {
        self.artists.clear();
        self.tracks.clear();
    }
}

impl Default for Seeds {
    fn default() -> Self {
        Self::new()
    }
}
