//! # CLI Module
//!
//! User-facing command implementations. Each command constructs a
//! [`SpotifyClient`] from the environment, delegates to the query operations
//! or the download delegate, and renders results with tables, spinners and
//! the colored status macros.
//!
//! Error presentation policy: unrecoverable failures (missing credentials
//! store, failed token exchange) terminate via the `error!` macro with a
//! hint on how to recover; everything else prints a warning and exits
//! normally.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    error,
    spotify::{ClientConfig, SpotifyClient},
};

mod auth;
mod catalog;
mod download;
mod search;

pub use auth::refresh;
pub use auth::set_key;
pub use auth::status;
pub use catalog::albums;
pub use catalog::analysis;
pub use catalog::artist;
pub use catalog::artist_albums;
pub use catalog::features;
pub use catalog::top_tracks;
pub use catalog::track;
pub use download::download;
pub use search::search;

/// Builds a ready-to-use client or terminates with a recovery hint.
pub(crate) async fn connect_client(force_refresh: bool) -> SpotifyClient {
    let mut config = ClientConfig::from_env();
    config.force_refresh = force_refresh;

    match SpotifyClient::new(config).await {
        Ok(client) => client,
        Err(e) => {
            error!(
                "Cannot initialize Spotify client. Run `spotkit auth set-key` first.\n Error: {}",
                e
            );
        }
    }
}

/// Spinner shown while a request is in flight.
pub(crate) fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}
