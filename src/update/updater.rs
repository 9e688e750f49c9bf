//! Update orchestration: check the feed, stage the installer, hand off.

use std::path::{Path, PathBuf};
use std::process::Command;

use log::{error, info, warn};

use crate::error::{Error, Result};
use crate::update::download;
use crate::update::github;

/// Repository releases are published to.
const GITHUB_REPO: &str = "skipjack-browser/skipjack";

/// Client string the release feed requires on every request.
const USER_AGENT: &str = concat!("skipjack/", env!("CARGO_PKG_VERSION"));

#[cfg(target_os = "windows")]
const INSTALLER_EXTENSION: &str = ".exe";
#[cfg(target_os = "macos")]
const INSTALLER_EXTENSION: &str = ".dmg";
#[cfg(not(any(target_os = "windows", target_os = "macos")))]
const INSTALLER_EXTENSION: &str = ".AppImage";

/// Where the update flow currently stands.
#[derive(Debug, Clone)]
pub enum UpdateStatus {
    Idle,
    Checking,
    NotFound,
    Downloading { version: String },
    Ready(PendingUpdate),
    Failed(String),
    Launching,
}

/// A downloaded installer waiting for the user's go-ahead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingUpdate {
    /// Release tag, verbatim.
    pub version: String,
    /// Release notes, possibly empty.
    pub notes: String,
    /// Where the installer was staged.
    pub path: PathBuf,
}

/// Outcome of one update check, shaped for the UI: an installer is staged,
/// there is nothing to offer, or the attempt failed with a message. A missing
/// release or missing installer asset is `NotFound`, never `Failed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateCheck {
    Ready(PendingUpdate),
    NotFound,
    Failed(String),
}

/// Drives the check → download → launch flow against the release feed.
///
/// One flow at a time: `check_for_update` borrows exclusively, and the UI
/// keeps its trigger disabled until the returned future resolves. There are
/// no retries, no timeouts, and no cancellation; a failed attempt is over
/// until the user asks again.
#[derive(Debug)]
pub struct Updater {
    repo: String,
    api_base: String,
    download_dir: PathBuf,
    installer_extension: String,
    status: UpdateStatus,
}

impl Updater {
    /// Updater for the application's own release repository.
    pub fn new() -> Self {
        Self::for_repo(GITHUB_REPO)
    }

    /// Updater for an arbitrary "owner/name" repository.
    pub fn for_repo(repo: impl Into<String>) -> Self {
        Self {
            repo: repo.into(),
            api_base: github::GITHUB_API.to_string(),
            download_dir: std::env::temp_dir(),
            installer_extension: INSTALLER_EXTENSION.to_string(),
            status: UpdateStatus::Idle,
        }
    }

    /// Override the release feed endpoint.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Override where installers are staged (defaults to the OS temp dir).
    pub fn with_download_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.download_dir = dir.into();
        self
    }

    /// Override the installer extension selected from release assets.
    pub fn with_installer_extension(mut self, extension: impl Into<String>) -> Self {
        self.installer_extension = extension.into();
        self
    }

    pub fn status(&self) -> &UpdateStatus {
        &self.status
    }

    /// Check the release feed and, when an installer is published, stage it
    /// in the download directory.
    ///
    /// Every error is converted to [`UpdateCheck::Failed`] here, carrying the
    /// underlying message verbatim; nothing from the flow escapes as an `Err`
    /// or a panic.
    pub async fn check_for_update(&mut self) -> UpdateCheck {
        self.status = UpdateStatus::Checking;

        let check = match self.run_check().await {
            Ok(check) => check,
            Err(err) => UpdateCheck::Failed(err.to_string()),
        };

        self.status = match &check {
            UpdateCheck::Ready(update) => {
                info!("Update {} staged at {}", update.version, update.path.display());
                UpdateStatus::Ready(update.clone())
            }
            UpdateCheck::NotFound => {
                info!("No update available");
                UpdateStatus::NotFound
            }
            UpdateCheck::Failed(message) => {
                error!("Update check failed: {message}");
                UpdateStatus::Failed(message.clone())
            }
        };

        check
    }

    async fn run_check(&mut self) -> Result<UpdateCheck> {
        let client = self.http_client()?;

        let release =
            match github::fetch_latest_release(&client, &self.api_base, &self.repo).await {
                Ok(release) => release,
                Err(Error::NoRelease) => return Ok(UpdateCheck::NotFound),
                Err(err) => return Err(err),
            };

        let Some(asset) = release.installer_asset(&self.installer_extension) else {
            info!(
                "Latest release {} has no {} asset",
                release.tag_name, self.installer_extension
            );
            return Ok(UpdateCheck::NotFound);
        };

        let version = release.tag_name.clone();
        let dest = self.download_dir.join(&asset.name);
        self.status = UpdateStatus::Downloading { version: version.clone() };

        download::download_to(&client, &asset.browser_download_url, &dest).await?;

        Ok(UpdateCheck::Ready(PendingUpdate {
            version,
            notes: release.notes().to_string(),
            path: dest,
        }))
    }

    fn http_client(&self) -> Result<reqwest::Client> {
        // No timeout: a hung remote stalls the flow, and the UI offers no
        // cancellation. The user waits or restarts. Redirects stay on the
        // default policy; release asset URLs 302 to CDN hosts.
        Ok(reqwest::Client::builder().user_agent(USER_AGENT).build()?)
    }

    /// Hand the staged installer to the OS and exit.
    ///
    /// Opens `update.path` with the platform's default handler and terminates
    /// the process immediately, without waiting for the installer or checking
    /// that it started. The installer is expected to replace this application,
    /// so there is nothing left to coordinate with.
    pub fn run_installer(&mut self, update: PendingUpdate) -> ! {
        self.status = UpdateStatus::Launching;
        info!("Launching installer {}", update.path.display());

        if let Err(err) = open_with_default_handler(&update.path) {
            warn!("Failed to launch installer: {err}");
        }

        std::process::exit(0);
    }
}

impl Default for Updater {
    fn default() -> Self {
        Self::new()
    }
}

/// Ask the OS to open `path` with whatever handles that file type.
fn open_with_default_handler(path: &Path) -> std::io::Result<()> {
    #[cfg(target_os = "macos")]
    let mut command = Command::new("open");
    #[cfg(target_os = "windows")]
    let mut command = Command::new("explorer");
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let mut command = Command::new("xdg-open");

    command.arg(path).spawn().map(|_| ())
}
