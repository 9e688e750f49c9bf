// Self-update: release feed, installer download, install handoff

pub mod download;
pub mod github;
pub mod updater;

pub use github::{Release, ReleaseAsset};
pub use updater::{PendingUpdate, UpdateCheck, UpdateStatus, Updater};
