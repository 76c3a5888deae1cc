use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Timestamp format used for `SPOTIFY_TOKEN_CREATION` in the credentials
/// store. Interpreted as UTC.
pub const TOKEN_CREATION_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The durable credentials record, persisted as a pretty-printed JSON object.
///
/// `client_key` is the base64 of `client_id:client_secret`, ready to be sent
/// verbatim in an `Authorization: Basic` header. The remaining fields track
/// the cached bearer token and its lifetime; they are rewritten wholesale
/// after every successful token refresh and never partially updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(rename = "SPOTIFY_KEY")]
    pub client_key: String,
    #[serde(rename = "SPOTIFY_TOKEN")]
    pub token: String,
    #[serde(rename = "SPOTIFY_TOKEN_CREATION")]
    pub token_creation: String,
    #[serde(rename = "SPOTIFY_TOKEN_DURATION")]
    pub token_duration: u64,
}

impl Credentials {
    /// Parses the creation timestamp as a UTC epoch second.
    pub fn creation_timestamp(&self) -> Option<i64> {
        NaiveDateTime::parse_from_str(&self.token_creation, TOKEN_CREATION_FORMAT)
            .ok()
            .map(|dt| dt.and_utc().timestamp())
    }

    /// Whether the cached token is stale at the given wall-clock time.
    ///
    /// True if the token is empty, the creation timestamp is unparsable, or
    /// the lifetime has elapsed. Pure function of the record; no I/O.
    pub fn is_expired_at(&self, now: i64) -> bool {
        if self.token.is_empty() {
            return true;
        }
        match self.creation_timestamp() {
            Some(created) => now - created >= self.token_duration as i64,
            None => true,
        }
    }
}

/// Response body of the client-credentials token exchange.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenGrant {
    pub access_token: String,
    pub expires_in: u64,
}

/// Entity type accepted by the search endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SearchKind {
    Artist,
    Album,
    Track,
    Playlist,
    Show,
    Episode,
    Audiobook,
}

impl SearchKind {
    /// Key under which the search response nests this kind's result page,
    /// e.g. `tracks` for [`SearchKind::Track`].
    pub fn container_key(&self) -> &'static str {
        match self {
            SearchKind::Artist => "artists",
            SearchKind::Album => "albums",
            SearchKind::Track => "tracks",
            SearchKind::Playlist => "playlists",
            SearchKind::Show => "shows",
            SearchKind::Episode => "episodes",
            SearchKind::Audiobook => "audiobooks",
        }
    }
}

impl fmt::Display for SearchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SearchKind::Artist => "artist",
            SearchKind::Album => "album",
            SearchKind::Track => "track",
            SearchKind::Playlist => "playlist",
            SearchKind::Show => "show",
            SearchKind::Episode => "episode",
            SearchKind::Audiobook => "audiobook",
        };
        write!(f, "{}", s)
    }
}

/// One page of search results for a single entity container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchPage {
    pub items: Vec<SearchItem>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub offset: u64,
}

/// A single search hit. Only the fields downstream lookups rely on are kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub popularity: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub popularity: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistRef {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Album {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub album_type: String,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
}

/// Paging container returned by `/artists/{id}/albums`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumsPage {
    pub items: Vec<Album>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub duration_ms: u64,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
}

/// `{"tracks": [...]}` wrapper returned by `/artists/{id}/top-tracks`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopTracksResponse {
    pub tracks: Vec<Track>,
}

/// `{"albums": [...]}` wrapper returned by the `/albums?ids=` batch lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeveralAlbumsResponse {
    pub albums: Vec<AlbumDetail>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumDetail {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub release_date: String,
    pub tracks: TrackPage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackPage {
    pub items: Vec<Track>,
}

/// `{"audio_features": [...]}` wrapper returned by `/audio-features?ids=`.
/// Unknown ids come back as `null` entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioFeaturesResponse {
    pub audio_features: Vec<Option<AudioFeatures>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioFeatures {
    pub id: String,
    #[serde(default)]
    pub danceability: f64,
    #[serde(default)]
    pub energy: f64,
    #[serde(default)]
    pub key: i32,
    #[serde(default)]
    pub loudness: f64,
    #[serde(default)]
    pub mode: i32,
    #[serde(default)]
    pub speechiness: f64,
    #[serde(default)]
    pub acousticness: f64,
    #[serde(default)]
    pub instrumentalness: f64,
    #[serde(default)]
    pub liveness: f64,
    #[serde(default)]
    pub valence: f64,
    #[serde(default)]
    pub tempo: f64,
    #[serde(default)]
    pub duration_ms: u64,
    #[serde(default)]
    pub time_signature: i32,
}

/// Track-level summary of an `/audio-analysis/{id}` response. The section and
/// segment arrays are large and unused here, so they are not modelled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioAnalysis {
    pub track: AnalysisTrack,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisTrack {
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub tempo: f64,
    #[serde(default)]
    pub key: i32,
    #[serde(default)]
    pub mode: i32,
    #[serde(default)]
    pub time_signature: i32,
    #[serde(default)]
    pub loudness: f64,
}

#[derive(Tabled)]
pub struct SearchTableRow {
    pub id: String,
    pub name: String,
}

#[derive(Tabled)]
pub struct TrackTableRow {
    pub id: String,
    pub name: String,
    pub artists: String,
}

#[derive(Tabled)]
pub struct FeatureTableRow {
    pub id: String,
    pub tempo: f64,
    pub key: i32,
    pub energy: f64,
    pub danceability: f64,
}
