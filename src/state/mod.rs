// Browsing profile state management

pub mod bookmarks;
pub mod history;
pub mod profile;
pub mod settings;

pub use bookmarks::{BookmarkEntry, Bookmarks};
pub use history::{HISTORY_LIMIT, History, HistoryEntry};
pub use profile::ProfileStore;
pub use settings::{AppSettings, DEFAULT_START_PAGE};
