//! Fetches the source spreadsheet once and keeps it on disk.

use chrono::{DateTime, Local, NaiveDate};
use futures::StreamExt;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{ProcessingError, Result};
use crate::utils::filename::source_file_name;
use crate::utils::progress::ProgressReporter;

/// Return the local copy of `url` inside `dir`, downloading it if absent.
///
/// An existing file is used as-is, whatever its age or content.
pub async fn ensure_source(
    url: &str,
    dir: &Path,
    progress: Option<&ProgressReporter>,
) -> Result<PathBuf> {
    let path = dir.join(source_file_name(url)?);

    if path.exists() {
        debug!("Using existing source file {}", path.display());
        return Ok(path);
    }

    fs::create_dir_all(dir)?;
    info!("Downloading {} to {}", url, path.display());
    download(url, &path, progress).await?;

    Ok(path)
}

/// Stream `url` into `path`. A failed transfer leaves the partial file behind.
pub async fn download(url: &str, path: &Path, progress: Option<&ProgressReporter>) -> Result<()> {
    let response = reqwest::get(url).await?;

    let status = response.status();
    if !status.is_success() {
        return Err(ProcessingError::DownloadStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let total_size = response.content_length().unwrap_or(0);
    if let Some(progress) = progress {
        if total_size > 0 {
            progress.set_byte_length(total_size);
        }
    }

    let mut file = File::create(path)?;
    let mut downloaded = 0u64;
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk)?;
        downloaded += chunk.len() as u64;
        if let Some(progress) = progress {
            progress.update(downloaded);
        }
    }
    file.flush()?;

    debug!("Downloaded {} bytes from {}", downloaded, url);
    Ok(())
}

/// Local date the file was created, or last modified where the platform
/// does not record creation time
pub fn download_stamp(path: &Path) -> Result<NaiveDate> {
    let metadata = fs::metadata(path)?;
    let timestamp = metadata.created().or_else(|_| metadata.modified())?;

    Ok(DateTime::<Local>::from(timestamp).date_naive())
}
