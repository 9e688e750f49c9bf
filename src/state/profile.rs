// Persistent storage for the browsing profile

use anyhow::{Context, Result};
use log::warn;
use serde::{Serialize, de::DeserializeOwned};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::bookmarks::BookmarkEntry;
use crate::state::history::HistoryEntry;
use crate::state::settings::AppSettings;

#[cfg(debug_assertions)]
const APP_NAME: &str = "skipjack-dev";

#[cfg(not(debug_assertions))]
const APP_NAME: &str = "skipjack";

/// Manages the profile directory and its JSON documents.
///
/// Each collection lives in its own file and is rewritten in full on every
/// save. The store is only ever driven from the single UI-facing execution
/// context; there is no cross-process or cross-thread coordination.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    profile_dir: PathBuf,
}

impl ProfileStore {
    /// Create a new ProfileStore, initializing the profile directory if needed
    pub fn new() -> Result<Self> {
        let profile_dir = Self::default_profile_dir()?;

        if !profile_dir.exists() {
            fs::create_dir_all(&profile_dir).context("Failed to create profile directory")?;
        }

        Ok(Self { profile_dir })
    }

    /// Point the store at an existing directory (tests, portable profiles).
    pub fn with_dir(profile_dir: impl Into<PathBuf>) -> Self {
        Self { profile_dir: profile_dir.into() }
    }

    /// Get the platform-specific profile directory
    fn default_profile_dir() -> Result<PathBuf> {
        dirs::config_dir().map(|p| p.join(APP_NAME)).context("Could not determine config directory")
    }

    /// Get path to a specific profile file
    fn file_path(&self, filename: &str) -> PathBuf {
        self.profile_dir.join(filename)
    }

    /// Load data from a JSON file
    fn load_json<T: DeserializeOwned>(&self, filename: &str) -> Result<Option<T>> {
        let path = self.file_path(filename);

        if !path.exists() {
            return Ok(None);
        }

        let data =
            fs::read_to_string(&path).with_context(|| format!("Failed to read {}", filename))?;

        let value: T = serde_json::from_str(&data)
            .with_context(|| format!("Failed to deserialize {}", filename))?;

        Ok(Some(value))
    }

    /// Save data to a JSON file (atomic via temp + rename).
    fn save_json<T: Serialize + ?Sized>(&self, filename: &str, data: &T) -> Result<()> {
        let path = self.file_path(filename);

        let json = serde_json::to_string_pretty(data)
            .with_context(|| format!("Failed to serialize {}", filename))?;

        atomic_write(&path, json.as_bytes())
            .with_context(|| format!("Failed to write {}", filename))?;

        Ok(())
    }

    /// Load a persisted collection, degrading to empty on missing or
    /// unreadable data. A malformed file must never take the profile down;
    /// the next save rewrites it wholesale anyway.
    fn load_collection<T: DeserializeOwned>(&self, filename: &str) -> Vec<T> {
        match self.load_json(filename) {
            Ok(Some(entries)) => entries,
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!("Ignoring unreadable {}: {err:#}", filename);
                Vec::new()
            }
        }
    }

    // =========================================================================
    // History
    // =========================================================================

    const HISTORY_FILE: &'static str = "history.json";

    /// Load browsing history from disk (empty on missing or malformed data)
    pub fn load_history(&self) -> Vec<HistoryEntry> {
        self.load_collection(Self::HISTORY_FILE)
    }

    /// Save browsing history to disk, replacing the stored collection
    pub fn save_history(&self, entries: &[HistoryEntry]) -> Result<()> {
        self.save_json(Self::HISTORY_FILE, entries)
    }

    // =========================================================================
    // Bookmarks
    // =========================================================================

    const BOOKMARKS_FILE: &'static str = "bookmarks.json";

    /// Load bookmarks from disk (empty on missing or malformed data)
    pub fn load_bookmarks(&self) -> Vec<BookmarkEntry> {
        self.load_collection(Self::BOOKMARKS_FILE)
    }

    /// Save bookmarks to disk, replacing the stored collection
    pub fn save_bookmarks(&self, entries: &[BookmarkEntry]) -> Result<()> {
        self.save_json(Self::BOOKMARKS_FILE, entries)
    }

    // =========================================================================
    // Settings
    // =========================================================================

    const SETTINGS_FILE: &'static str = "settings.json";

    /// Load application settings from disk, falling back to defaults
    pub fn load_settings(&self) -> AppSettings {
        match self.load_json(Self::SETTINGS_FILE) {
            Ok(Some(settings)) => settings,
            Ok(None) => AppSettings::default(),
            Err(err) => {
                warn!("Ignoring unreadable {}: {err:#}", Self::SETTINGS_FILE);
                AppSettings::default()
            }
        }
    }

    /// Save application settings to disk
    pub fn save_settings(&self, settings: &AppSettings) -> Result<()> {
        self.save_json(Self::SETTINGS_FILE, settings)
    }
}

/// Write `data` to `path` atomically: write to a sibling temp file first, then
/// rename.  `rename` is atomic on POSIX (same filesystem), so readers never see
/// a truncated or partially-written file — they get either the old content or the
/// new content, never a corrupt intermediate.
fn atomic_write(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let dir = path.parent().unwrap_or(path);
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    std::io::Write::write_all(&mut tmp, data)?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
