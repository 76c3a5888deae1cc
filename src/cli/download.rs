use std::path::PathBuf;

use crate::{
    config,
    download::{DownloadOutcome, download_track},
    error, success,
};

/// Downloads a track via the external downloader delegate.
pub async fn download(track_id: String, output: Option<PathBuf>) {
    let client = super::connect_client(false).await;
    let directory = output.unwrap_or_else(config::download_dir);
    let program = config::downloader_program();

    let pb = super::spinner("Downloading...");
    let result = download_track(client.token(), &track_id, &directory, &program).await;
    pb.finish_and_clear();

    match result {
        Ok(DownloadOutcome::AlreadyExists) => {
            success!("{}.mp3 already exists, nothing to do.", track_id);
        }
        Ok(DownloadOutcome::Downloaded) => {
            success!("Downloaded {}.mp3 to {}", track_id, directory.display());
        }
        Err(e) => {
            error!("Download failed: {}", e);
        }
    }
}
