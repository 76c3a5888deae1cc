//! Configuration management for the Spotify client-credentials CLI.
//!
//! This module handles loading and accessing configuration values from
//! environment variables and `.env` files. The configuration system follows
//! a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (URLs, paths, downloader command)

use std::{env, path::PathBuf};

use dotenv;

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the necessary directory structure if it doesn't exist and loads
/// environment variables from `spotkit/.env` in the platform-specific local
/// data directory. Missing files are fine; all settings have defaults.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/spotkit/.env`
/// - macOS: `~/Library/Application Support/spotkit/.env`
/// - Windows: `%LOCALAPPDATA%/spotkit/.env`
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created.
pub async fn load_env() -> Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotkit/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    // the .env file is optional
    let _ = dotenv::from_path(path);
    Ok(())
}

/// Returns the Spotify Web API base URL.
///
/// Reads `SPOTIFY_API_URL`, defaulting to the public endpoint. Overridable
/// so tests can point the client at a mock server.
pub fn spotify_api_url() -> String {
    env::var("SPOTIFY_API_URL").unwrap_or_else(|_| "https://api.spotify.com/v1".to_string())
}

/// Returns the OAuth token exchange URL used by the client-credentials flow.
///
/// Reads `SPOTIFY_API_TOKEN_URL`, defaulting to the public accounts endpoint.
pub fn spotify_token_url() -> String {
    env::var("SPOTIFY_API_TOKEN_URL")
        .unwrap_or_else(|_| "https://accounts.spotify.com/api/token".to_string())
}

/// Returns the path of the credentials store file.
///
/// Reads `SPOTIFY_CREDENTIALS_FILE`; defaults to `spotkit/credentials.json`
/// in the platform-specific local data directory.
pub fn credentials_path() -> PathBuf {
    if let Ok(path) = env::var("SPOTIFY_CREDENTIALS_FILE") {
        return PathBuf::from(path);
    }
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotkit/credentials.json");
    path
}

/// Returns the external downloader program invoked by the download delegate.
///
/// Reads `SPOTIFY_DOWNLOADER_BIN`, defaulting to `spotdl`. The program is
/// spawned directly (no shell) and receives the bearer token through the
/// `DOWNLOADER_AUTH_TOKEN` environment variable.
pub fn downloader_program() -> String {
    env::var("SPOTIFY_DOWNLOADER_BIN").unwrap_or_else(|_| "spotdl".to_string())
}

/// Returns the default output directory for downloaded tracks.
///
/// Reads `SPOTIFY_DOWNLOAD_DIR`, defaulting to the current directory.
pub fn download_dir() -> PathBuf {
    env::var("SPOTIFY_DOWNLOAD_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
}
