use crate::{
    error::ApiError,
    spotify::SpotifyClient,
    types::{
        Album, AlbumDetail, AlbumsPage, Artist, AudioAnalysis, AudioFeatures,
        AudioFeaturesResponse, SeveralAlbumsResponse, TopTracksResponse, Track,
    },
};

impl SpotifyClient {
    /// Retrieves a single artist by its Spotify ID.
    pub async fn get_artist(&mut self, id: &str) -> Result<Artist, ApiError> {
        self.get_json(&format!("/artists/{}", id), &[]).await
    }

    /// Retrieves one page of an artist's albums starting at `offset`.
    pub async fn get_artist_albums(
        &mut self,
        id: &str,
        offset: u64,
    ) -> Result<Vec<Album>, ApiError> {
        let page: AlbumsPage = self
            .get_json(
                &format!("/artists/{}/albums", id),
                &[("offset", offset.to_string())],
            )
            .await?;
        Ok(page.items)
    }

    /// Retrieves an artist's top tracks for a country market.
    pub async fn get_artist_top_tracks(
        &mut self,
        id: &str,
        country: &str,
    ) -> Result<Vec<Track>, ApiError> {
        let response: TopTracksResponse = self
            .get_json(
                &format!("/artists/{}/top-tracks", id),
                &[("country", country.to_string())],
            )
            .await?;
        Ok(response.tracks)
    }

    /// Retrieves a single track by its Spotify ID.
    pub async fn get_track(&mut self, id: &str) -> Result<Track, ApiError> {
        self.get_json(&format!("/tracks/{}", id), &[]).await
    }

    /// Retrieves detailed information for several albums in one request.
    /// The API accepts up to 20 comma-separated IDs.
    pub async fn get_several_albums(
        &mut self,
        ids: &[String],
    ) -> Result<Vec<AlbumDetail>, ApiError> {
        let response: SeveralAlbumsResponse = self
            .get_json("/albums", &[("ids", ids.join(","))])
            .await?;
        Ok(response.albums)
    }

    /// Retrieves audio features for several tracks in one request.
    /// Unknown IDs come back as null entries and are dropped.
    pub async fn get_audio_features(
        &mut self,
        ids: &[String],
    ) -> Result<Vec<AudioFeatures>, ApiError> {
        let response: AudioFeaturesResponse = self
            .get_json("/audio-features", &[("ids", ids.join(","))])
            .await?;
        Ok(response.audio_features.into_iter().flatten().collect())
    }

    /// Retrieves the audio analysis summary of a track.
    pub async fn get_audio_analysis(&mut self, id: &str) -> Result<AudioAnalysis, ApiError> {
        self.get_json(&format!("/audio-analysis/{}", id), &[]).await
    }
}
