//! Download executor: fetch one resolved URL and durably write it to its
//! destination, replacing any existing file. No retries — a failure here is
//! fatal to the owning album.

use std::path::Path;

use futures_util::StreamExt;
use reqwest::Client;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

use super::error::SyncError;

/// Fetch `url` into `dest` and return the number of bytes written.
///
/// Parent directories are created as needed. `expected_size` is `Some` for
/// pictures only: the catalog's reported byte count is authoritative for
/// them, while transcoded video tier sizes are unreliable and go unchecked.
pub async fn download(
    client: &Client,
    url: &str,
    dest: &Path,
    expected_size: Option<u64>,
) -> Result<u64, SyncError> {
    let response = client.get(url).send().await?;
    if !response.status().is_success() {
        return Err(SyncError::HttpStatus {
            status: response.status().as_u16(),
            url: url.to_string(),
        });
    }

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).await?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(dest)
        .await?;

    let mut written: u64 = 0;
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    file.flush().await?;

    if let Some(expected) = expected_size {
        if written != expected {
            return Err(SyncError::SizeMismatch {
                path: dest.to_path_buf(),
                expected,
                actual: written,
            });
        }
    }

    Ok(written)
}
