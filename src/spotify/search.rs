use serde::Deserialize;

use crate::{
    error::ApiError,
    spotify::SpotifyClient,
    types::{SearchItem, SearchKind, SearchPage},
};

/// Maximum number of items the API returns per search request. Larger limits
/// are assembled client-side by fetching consecutive pages.
pub const SEARCH_PAGE_CAP: u64 = 50;

/// Search response envelope. The API nests the result page under a key named
/// after the pluralized entity type, so every container is optional here and
/// the one matching the requested kind must be present.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    artists: Option<SearchPage>,
    #[serde(default)]
    albums: Option<SearchPage>,
    #[serde(default)]
    tracks: Option<SearchPage>,
    #[serde(default)]
    playlists: Option<SearchPage>,
    #[serde(default)]
    shows: Option<SearchPage>,
    #[serde(default)]
    episodes: Option<SearchPage>,
    #[serde(default)]
    audiobooks: Option<SearchPage>,
}

impl SearchResponse {
    fn container(self, kind: SearchKind) -> Option<SearchPage> {
        match kind {
            SearchKind::Artist => self.artists,
            SearchKind::Album => self.albums,
            SearchKind::Track => self.tracks,
            SearchKind::Playlist => self.playlists,
            SearchKind::Show => self.shows,
            SearchKind::Episode => self.episodes,
            SearchKind::Audiobook => self.audiobooks,
        }
    }
}

impl SpotifyClient {
    /// Searches the catalog, assembling results past the per-request page cap.
    ///
    /// Pages of `min(remaining, 50)` items are fetched sequentially and
    /// concatenated in request order. Fetching stops at a short page (natural
    /// end of results) or when the requested limit is used up.
    ///
    /// Failure policy: an error on the first page is propagated as-is. An
    /// error on any later page collapses the whole result to an empty vector,
    /// which callers must treat as a different failure mode than a first-page
    /// error; enable
    /// [`partial_search_results`](SpotifyClient::partial_search_results) to
    /// get the already-collected items instead.
    pub async fn search(
        &mut self,
        query: &str,
        kind: SearchKind,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<SearchItem>, ApiError> {
        let mut items: Vec<SearchItem> = Vec::new();
        if limit == 0 {
            return Ok(items);
        }

        let mut remaining = limit;
        let mut offset = offset;

        loop {
            let page_limit = remaining.min(SEARCH_PAGE_CAP);
            let params = [
                ("q", query.to_string()),
                ("type", kind.to_string()),
                ("offset", offset.to_string()),
                ("limit", page_limit.to_string()),
            ];

            let page = match self.get_json::<SearchResponse>("/search", &params).await {
                Ok(response) => match response.container(kind) {
                    Some(page) => page,
                    None => {
                        let err = ApiError::UnexpectedResponseShape(format!(
                            "missing `{}` container",
                            kind.container_key()
                        ));
                        return self.page_failure(items, err);
                    }
                },
                Err(e) => return self.page_failure(items, e),
            };

            let fetched = page.items.len() as u64;
            items.extend(page.items);

            // A short page is the natural end of results.
            if fetched < SEARCH_PAGE_CAP || remaining <= SEARCH_PAGE_CAP {
                return Ok(items);
            }
            remaining -= SEARCH_PAGE_CAP;
            offset += SEARCH_PAGE_CAP;
        }
    }

    /// Applies the pagination failure policy. Nothing collected yet means the
    /// first page failed and the caller sees the real error.
    fn page_failure(
        &self,
        collected: Vec<SearchItem>,
        err: ApiError,
    ) -> Result<Vec<SearchItem>, ApiError> {
        if collected.is_empty() {
            Err(err)
        } else if self.allow_partial_search_results() {
            Ok(collected)
        } else {
            Ok(Vec::new())
        }
    }
}
