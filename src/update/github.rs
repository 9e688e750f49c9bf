//! Client for the GitHub release feed.

use log::info;
use serde::Deserialize;

use crate::error::{Error, Result};

/// Production endpoint of the release feed.
pub(crate) const GITHUB_API: &str = "https://api.github.com";

/// A published release as reported by the feed. Ephemeral; never persisted.
#[derive(Debug, Clone, Deserialize)]
pub struct Release {
    /// Release tag, surfaced to the user verbatim as the version.
    pub tag_name: String,
    /// Release notes; the feed reports `null` when none were written.
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
}

/// One downloadable file attached to a release.
#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseAsset {
    pub name: String,
    pub browser_download_url: String,
}

impl Release {
    /// First asset whose file name ends with `extension`.
    pub fn installer_asset(&self, extension: &str) -> Option<&ReleaseAsset> {
        self.assets.iter().find(|asset| asset.name.ends_with(extension))
    }

    /// Release notes, empty when the release carries none.
    pub fn notes(&self) -> &str {
        self.body.as_deref().unwrap_or_default()
    }
}

/// Fetch the latest release of `repo` ("owner/name") from the feed at `api_base`.
///
/// The body is buffered in full before decoding; release metadata is small and
/// bounded. A 404 means the repository has published no releases — that is a
/// [`Error::NoRelease`], distinct from transport or decode failures.
pub async fn fetch_latest_release(
    client: &reqwest::Client,
    api_base: &str,
    repo: &str,
) -> Result<Release> {
    let url = format!("{api_base}/repos/{repo}/releases/latest");
    info!("Checking release feed at {url}");

    let response = client.get(&url).send().await?;
    if response.status() == reqwest::StatusCode::NOT_FOUND {
        return Err(Error::NoRelease);
    }

    let release: Release = response.json().await.map_err(|err| {
        if err.is_decode() { Error::Protocol(err.to_string()) } else { Error::Network(err) }
    })?;

    Ok(release)
}
