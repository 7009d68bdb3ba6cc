//! Streaming asset download.

use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::core::GrabError;
use crate::github::HttpTransport;
use crate::models::Release;
use crate::utils::fs::make_executable;

/// Download the asset of `release` to `release.installed_path` and mark it
/// executable. Returns the number of bytes written.
///
/// A non-2xx response fails before the destination is touched. Once the file
/// is created, any existing content is truncated; a failure part-way through
/// leaves a partial file behind.
pub async fn download_release<T: HttpTransport>(
    transport: &T,
    release: &Release,
) -> Result<u64, GrabError> {
    let path = &release.installed_path;
    let mut response = transport.get(&release.url).await?;

    if !response.is_success() {
        return Err(GrabError::UnexpectedStatus {
            url: response.url().to_string(),
            status: response.status(),
        });
    }

    let mut file =
        tokio::fs::File::create(path).await.map_err(|e| GrabError::io("create file", path, e))?;

    let mut written = 0u64;
    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk).await.map_err(|e| GrabError::io("write", path, e))?;
        written += chunk.len() as u64;
    }
    file.flush().await.map_err(|e| GrabError::io("flush", path, e))?;
    drop(file);

    debug!("Wrote {} bytes to {}", written, path.display());
    make_executable(path)?;
    info!("Installed {} {} to {}", release.slug(), release.version, path.display());

    Ok(written)
}
