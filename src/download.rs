//! External downloader delegate.
//!
//! Triggers the configured downloader binary for a single track. The delegate
//! contract is deliberately thin: success means exit code 0 and the expected
//! output file existing afterwards. The process is spawned directly with
//! structured arguments (no shell), and the bearer token travels through the
//! [`DOWNLOADER_TOKEN_ENV`] environment variable instead of argv so it never
//! shows up in process listings.

use std::path::Path;

use tokio::process::Command;

use crate::error::DownloadError;

/// Environment variable through which the bearer token is handed to the
/// downloader process.
pub const DOWNLOADER_TOKEN_ENV: &str = "DOWNLOADER_AUTH_TOKEN";

/// Result of a delegate invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// The expected file was already present; the downloader was not invoked.
    AlreadyExists,
    /// The downloader ran and produced the file.
    Downloaded,
}

/// Expected output file for a track inside the given directory.
pub fn track_file(directory: &Path, track_id: &str) -> std::path::PathBuf {
    directory.join(format!("{}.mp3", track_id))
}

/// Downloads a track via the external downloader.
///
/// If `<directory>/<track_id>.mp3` already exists, reports
/// [`DownloadOutcome::AlreadyExists`] without spawning anything. Otherwise
/// invokes `program` with the track URL, output template and bitrate
/// arguments, then verifies both the exit status and the presence of the
/// output file.
pub async fn download_track(
    token: &str,
    track_id: &str,
    directory: &Path,
    program: &str,
) -> Result<DownloadOutcome, DownloadError> {
    let target = track_file(directory, track_id);
    if async_fs::metadata(&target).await.is_ok() {
        return Ok(DownloadOutcome::AlreadyExists);
    }
    async_fs::create_dir_all(directory).await?;

    let track_url = format!("https://open.spotify.com/track/{}", track_id);
    let status = Command::new(program)
        .arg(&track_url)
        .arg("--output")
        .arg(directory.join("{track-id}"))
        .arg("--bitrate")
        .arg("320k")
        .env(DOWNLOADER_TOKEN_ENV, token)
        .status()
        .await?;

    if !status.success() {
        return Err(DownloadError::ProcessFailed(status.code().unwrap_or(-1)));
    }
    if async_fs::metadata(&target).await.is_err() {
        return Err(DownloadError::OutputMissing(target.display().to_string()));
    }

    Ok(DownloadOutcome::Downloaded)
}
