//! Headless core for the Skipjack desktop browser.
//!
//! Everything that is not presentation lives here: the persisted browsing
//! profile (history, bookmarks, settings) and the self-update flow against
//! the GitHub release feed. The GUI shell owns windows, web views, and event
//! wiring, and drives this crate through [`state::ProfileStore`] and
//! [`update::Updater`].

pub mod error;
pub mod helpers;
pub mod state;
pub mod update;

pub use error::{Error, Result};
pub use state::{AppSettings, BookmarkEntry, Bookmarks, History, HistoryEntry, ProfileStore};
pub use update::{PendingUpdate, UpdateCheck, UpdateStatus, Updater};
