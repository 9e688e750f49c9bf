//! Browsing history: an append-only, capped navigation log.

use anyhow::Result;
use chrono::Local;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::helpers::is_recordable_url;
use crate::state::profile::ProfileStore;

/// Maximum number of entries kept; the oldest are evicted first.
pub const HISTORY_LIMIT: usize = 200;

/// One completed navigation. Never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryEntry {
    pub url: String,
    pub title: String,
    /// Local wall-clock time of the visit, preformatted for display.
    pub time: String,
}

/// The navigation log, loaded once at startup and rewritten in full on every
/// recorded visit.
#[derive(Debug)]
pub struct History {
    entries: Vec<HistoryEntry>,
    store: ProfileStore,
}

impl History {
    /// Load the persisted history from `store`.
    pub fn load(store: &ProfileStore) -> Self {
        Self { entries: store.load_history(), store: store.clone() }
    }

    /// Record a completed navigation and persist the updated log.
    ///
    /// Blank urls and `about:` pages are skipped. When the log grows past
    /// [`HISTORY_LIMIT`], the oldest entries are dropped before saving.
    pub fn record(&mut self, url: &str, title: &str) -> Result<()> {
        if !is_recordable_url(url) {
            debug!("Not recording navigation to {url:?}");
            return Ok(());
        }

        self.entries.push(HistoryEntry {
            url: url.to_string(),
            title: title.to_string(),
            time: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        });

        if self.entries.len() > HISTORY_LIMIT {
            let excess = self.entries.len() - HISTORY_LIMIT;
            self.entries.drain(..excess);
        }

        self.store.save_history(&self.entries)
    }

    /// Entries in append order, oldest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Entries newest first, the order the UI lists them in.
    pub fn recent(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
