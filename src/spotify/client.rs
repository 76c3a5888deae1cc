use std::path::PathBuf;

use reqwest::{Client, Response, StatusCode, header};
use serde::de::DeserializeOwned;

use crate::{config, error::ApiError, management::TokenManager};

/// Explicit construction parameters for a [`SpotifyClient`].
///
/// Carried as a plain value instead of ambient statics so multiple client
/// instances, each with their own credentials store and endpoints, can
/// coexist (the tests point these at mock servers and temp files).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the resource API, e.g. `https://api.spotify.com/v1`.
    pub api_url: String,
    /// URL of the client-credentials token endpoint.
    pub token_url: String,
    /// Path of the JSON credentials store.
    pub credentials_path: PathBuf,
    /// Refresh the token at construction even if the cached one looks valid.
    pub force_refresh: bool,
}

impl ClientConfig {
    /// Builds a configuration from the environment (see [`crate::config`]).
    pub fn from_env() -> Self {
        ClientConfig {
            api_url: config::spotify_api_url(),
            token_url: config::spotify_token_url(),
            credentials_path: config::credentials_path(),
            force_refresh: false,
        }
    }
}

/// Executes authenticated requests against the Spotify Web API.
///
/// Owns the HTTP client and the [`TokenManager`]; every query operation goes
/// through [`get_json`](Self::get_json), which applies the one-shot
/// refresh-and-retry policy when the API rejects the cached token.
pub struct SpotifyClient {
    http: Client,
    tokens: TokenManager,
    api_url: String,
    partial_search_results: bool,
}

impl SpotifyClient {
    /// Loads the credentials store and ensures a usable token.
    ///
    /// When the cached token is still valid and no refresh is forced, no
    /// network round trip happens at all; otherwise exactly one token
    /// exchange is performed before the client is handed out.
    pub async fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let mut tokens = TokenManager::load(config.credentials_path, config.token_url).await?;
        tokens.ensure_valid(config.force_refresh).await?;

        Ok(SpotifyClient {
            http: Client::new(),
            tokens,
            api_url: config.api_url,
            partial_search_results: false,
        })
    }

    /// When enabled, a paginated search that fails on a later page returns
    /// the pages collected so far instead of discarding them. Off by default
    /// to keep the historical collapse-to-empty behavior.
    pub fn partial_search_results(mut self, allow: bool) -> Self {
        self.partial_search_results = allow;
        self
    }

    pub(crate) fn allow_partial_search_results(&self) -> bool {
        self.partial_search_results
    }

    /// The current bearer token, e.g. for handing to the download delegate.
    pub fn token(&self) -> &str {
        self.tokens.token()
    }

    pub fn tokens(&self) -> &TokenManager {
        &self.tokens
    }

    /// Builds and sends one authenticated GET request. Query pairs are
    /// URL-encoded by reqwest. Connect-level failures surface as
    /// [`ApiError::TransportFailure`]; received statuses are not interpreted
    /// here.
    async fn authenticated_get(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<Response, ApiError> {
        let response = self
            .http
            .get(url)
            .query(query)
            .bearer_auth(self.tokens.token())
            .header(header::ACCEPT, "application/json")
            .header(header::CONTENT_TYPE, "application/json")
            .send()
            .await?;
        Ok(response)
    }

    /// Executes one logical query with the one-shot auth retry.
    ///
    /// If the first attempt comes back 401 and the token manager agrees the
    /// token is stale, the token is refreshed and the identical request is
    /// retried exactly once - never more, and never for 403/429/5xx, which
    /// are surfaced directly for the caller to decide.
    ///
    /// Status classification, uniform across all query operations:
    /// 200 decodes into `T` (a decode failure is
    /// [`ApiError::UnexpectedResponseShape`]), 401/403 are
    /// [`ApiError::AuthFailure`], 429 is [`ApiError::RateLimited`], anything
    /// else is [`ApiError::RequestFailed`].
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &mut self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.api_url, path);

        let mut response = self.authenticated_get(&url, query).await?;
        if response.status() == StatusCode::UNAUTHORIZED && self.tokens.is_expired() {
            self.tokens.refresh().await?;
            response = self.authenticated_get(&url, query).await?;
        }

        match response.status() {
            StatusCode::OK => {}
            StatusCode::UNAUTHORIZED => {
                return Err(ApiError::AuthFailure("bad or expired token (401)".into()));
            }
            StatusCode::FORBIDDEN => {
                return Err(ApiError::AuthFailure("bad OAuth request (403)".into()));
            }
            StatusCode::TOO_MANY_REQUESTS => return Err(ApiError::RateLimited),
            other => return Err(ApiError::RequestFailed(other.as_u16())),
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::UnexpectedResponseShape(e.to_string()))
    }
}
