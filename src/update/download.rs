//! Streaming download of a release asset to disk.

use std::path::Path;

use futures::StreamExt as _;
use log::{debug, info};
use tokio::fs::File;
use tokio::io::AsyncWriteExt as _;

use crate::error::{Error, Result};

/// Download `url` to `dest`, streaming the body straight to disk.
///
/// The status is checked before `dest` is created, so a rejected request
/// leaves no file behind. Once the file exists, any failure removes it again
/// before the error propagates; a partial installer must never survive.
pub async fn download_to(client: &reqwest::Client, url: &str, dest: &Path) -> Result<()> {
    info!("Downloading {url} to {}", dest.display());

    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(Error::HttpStatus(status.as_u16()));
    }

    match write_stream(response, dest).await {
        Ok(bytes) => {
            debug!("Downloaded {bytes} bytes to {}", dest.display());
            Ok(())
        }
        Err(err) => {
            // Clean up the partial download
            let _ = tokio::fs::remove_file(dest).await;
            Err(err)
        }
    }
}

/// Stream the response body into a freshly created `dest`, returning the byte
/// count. Overwrites any pre-existing file at that path.
async fn write_stream(response: reqwest::Response, dest: &Path) -> Result<u64> {
    let mut file = File::create(dest).await?;
    let mut stream = response.bytes_stream();
    let mut written: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }

    file.flush().await?;
    Ok(written)
}
