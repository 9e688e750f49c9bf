//! Bookmarks: a unique-by-url collection grown by explicit user action.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::state::profile::ProfileStore;

/// One bookmarked page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookmarkEntry {
    pub url: String,
    pub title: String,
}

/// The bookmark collection. At most one entry per url; entries are never
/// auto-evicted, and removal is not offered.
#[derive(Debug)]
pub struct Bookmarks {
    entries: Vec<BookmarkEntry>,
    store: ProfileStore,
}

impl Bookmarks {
    /// Load the persisted bookmarks from `store`.
    pub fn load(store: &ProfileStore) -> Self {
        Self { entries: store.load_bookmarks(), store: store.clone() }
    }

    /// Bookmark `url`, persisting the updated collection.
    ///
    /// Returns `false` and leaves the collection untouched when the url is
    /// already bookmarked. An empty title falls back to the url itself.
    pub fn add(&mut self, url: &str, title: &str) -> Result<bool> {
        if self.contains(url) {
            return Ok(false);
        }

        let title = if title.is_empty() { url } else { title };
        self.entries.push(BookmarkEntry { url: url.to_string(), title: title.to_string() });
        self.store.save_bookmarks(&self.entries)?;

        Ok(true)
    }

    /// Whether `url` is already bookmarked.
    pub fn contains(&self, url: &str) -> bool {
        self.entries.iter().any(|entry| entry.url == url)
    }

    /// Entries in the order they were added.
    pub fn entries(&self) -> &[BookmarkEntry] {
        &self.entries
    }

    /// Entries newest first, the order the UI lists them in.
    pub fn recent(&self) -> impl Iterator<Item = &BookmarkEntry> {
        self.entries.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
