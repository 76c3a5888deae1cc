use tabled::Table;

use crate::{
    error, info,
    types::{FeatureTableRow, TrackTableRow},
    warning,
};

fn artist_names(artists: &[crate::types::ArtistRef]) -> String {
    artists
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Prints a single artist.
pub async fn artist(id: String) {
    let mut client = super::connect_client(false).await;

    match client.get_artist(&id).await {
        Ok(artist) => {
            info!("{} ({})", artist.name, artist.id);
            if !artist.genres.is_empty() {
                info!("Genres: {}", artist.genres.join(", "));
            }
            if let Some(popularity) = artist.popularity {
                info!("Popularity: {}", popularity);
            }
        }
        Err(e) => {
            error!("Failed to fetch artist: {}", e);
        }
    }
}

/// Prints one page of an artist's albums.
pub async fn artist_albums(id: String, offset: u64) {
    let mut client = super::connect_client(false).await;

    let pb = super::spinner("Fetching albums...");
    let result = client.get_artist_albums(&id, offset).await;
    pb.finish_and_clear();

    match result {
        Ok(albums) => {
            if albums.is_empty() {
                warning!("No albums found.");
                return;
            }
            for album in albums {
                info!(
                    "{} - {} [{}] ({})",
                    album.release_date,
                    album.name,
                    album.album_type,
                    album.id
                );
            }
        }
        Err(e) => {
            error!("Failed to fetch albums: {}", e);
        }
    }
}

/// Prints an artist's top tracks for a country market.
pub async fn top_tracks(id: String, country: String) {
    let mut client = super::connect_client(false).await;

    match client.get_artist_top_tracks(&id, &country).await {
        Ok(tracks) => {
            let rows: Vec<TrackTableRow> = tracks
                .into_iter()
                .map(|t| TrackTableRow {
                    id: t.id,
                    name: t.name,
                    artists: artist_names(&t.artists),
                })
                .collect();
            println!("{}", Table::new(rows));
        }
        Err(e) => {
            error!("Failed to fetch top tracks: {}", e);
        }
    }
}

/// Prints a single track.
pub async fn track(id: String) {
    let mut client = super::connect_client(false).await;

    match client.get_track(&id).await {
        Ok(track) => {
            info!("{} ({})", track.name, track.id);
            info!("Artists: {}", artist_names(&track.artists));
            info!("Duration: {}s", track.duration_ms / 1000);
        }
        Err(e) => {
            error!("Failed to fetch track: {}", e);
        }
    }
}

/// Prints detailed information for up to 20 albums.
pub async fn albums(ids: Vec<String>) {
    let mut client = super::connect_client(false).await;

    let pb = super::spinner("Fetching albums...");
    let result = client.get_several_albums(&ids).await;
    pb.finish_and_clear();

    match result {
        Ok(albums) => {
            for album in albums {
                info!("{} - {} ({})", album.release_date, album.name, album.id);
                for track in album.tracks.items {
                    println!("    {} ({})", track.name, track.id);
                }
            }
        }
        Err(e) => {
            error!("Failed to fetch albums: {}", e);
        }
    }
}

/// Prints audio features for up to 100 tracks as a table.
pub async fn features(ids: Vec<String>) {
    let mut client = super::connect_client(false).await;

    match client.get_audio_features(&ids).await {
        Ok(features) => {
            if features.is_empty() {
                warning!("No audio features available for the given IDs.");
                return;
            }
            let rows: Vec<FeatureTableRow> = features
                .into_iter()
                .map(|f| FeatureTableRow {
                    id: f.id,
                    tempo: f.tempo,
                    key: f.key,
                    energy: f.energy,
                    danceability: f.danceability,
                })
                .collect();
            println!("{}", Table::new(rows));
        }
        Err(e) => {
            error!("Failed to fetch audio features: {}", e);
        }
    }
}

/// Prints the audio analysis summary of a track.
pub async fn analysis(id: String) {
    let mut client = super::connect_client(false).await;

    let pb = super::spinner("Fetching audio analysis...");
    let result = client.get_audio_analysis(&id).await;
    pb.finish_and_clear();

    match result {
        Ok(analysis) => {
            info!("Duration: {:.1}s", analysis.track.duration);
            info!("Tempo: {:.1} bpm", analysis.track.tempo);
            info!(
                "Key: {} ({})",
                analysis.track.key,
                if analysis.track.mode == 1 { "major" } else { "minor" }
            );
            info!("Time signature: {}/4", analysis.track.time_signature);
            info!("Loudness: {:.1} dB", analysis.track.loudness);
        }
        Err(e) => {
            error!("Failed to fetch audio analysis: {}", e);
        }
    }
}
