use std::path::{Path, PathBuf};

use chrono::Utc;
use reqwest::{Client, StatusCode, header};

use crate::{
    error::ApiError,
    types::{Credentials, TOKEN_CREATION_FORMAT, TokenGrant},
};

/// Owns the credentials record and the cached bearer token.
///
/// Loaded once from the credentials store at client construction; the token
/// endpoint is only hit when the cached token is stale or a refresh is
/// forced, which saves one network round trip per instantiation.
#[derive(Debug)]
pub struct TokenManager {
    credentials: Credentials,
    path: PathBuf,
    token_url: String,
}

impl TokenManager {
    /// Reads the credentials record from the store.
    ///
    /// A missing, unreadable or malformed store is
    /// [`ApiError::CredentialsUnavailable`]. The stored token may be empty or
    /// stale; call [`ensure_valid`](Self::ensure_valid) before using it.
    pub async fn load(
        path: impl Into<PathBuf>,
        token_url: impl Into<String>,
    ) -> Result<Self, ApiError> {
        let path = path.into();
        let content = async_fs::read_to_string(&path)
            .await
            .map_err(|e| ApiError::CredentialsUnavailable(format!("{}: {}", path.display(), e)))?;
        let credentials: Credentials = serde_json::from_str(&content)
            .map_err(|e| ApiError::CredentialsUnavailable(format!("{}: {}", path.display(), e)))?;

        Ok(Self {
            credentials,
            path,
            token_url: token_url.into(),
        })
    }

    /// Whether the cached token is stale right now. No I/O.
    pub fn is_expired(&self) -> bool {
        self.credentials.is_expired_at(Utc::now().timestamp())
    }

    /// Construction policy: refresh if the token is stale or the caller
    /// forces it, otherwise reuse the cached token as-is.
    pub async fn ensure_valid(&mut self, force: bool) -> Result<(), ApiError> {
        if force || self.is_expired() {
            self.refresh().await?;
        }
        Ok(())
    }

    /// Performs the client-credentials exchange and persists the result.
    ///
    /// Refresh is all-or-nothing: the replacement record is built and written
    /// to the store before anything is committed in memory, so any failure
    /// (bad status, malformed body, transport or persist error) leaves both
    /// the cached token and the stored record exactly as they were.
    pub async fn refresh(&mut self) -> Result<&str, ApiError> {
        let client = Client::new();
        let response = client
            .post(&self.token_url)
            .header(
                header::AUTHORIZATION,
                format!("Basic {}", self.credentials.client_key),
            )
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body("grant_type=client_credentials")
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ApiError::AuthFailure(format!(
                "token exchange returned status {}",
                status.as_u16()
            )));
        }

        let bytes = response.bytes().await?;
        let grant: TokenGrant = serde_json::from_slice(&bytes)
            .map_err(|e| ApiError::AuthFailure(format!("malformed token response: {}", e)))?;

        let refreshed = Credentials {
            client_key: self.credentials.client_key.clone(),
            token: grant.access_token,
            token_creation: Utc::now().format(TOKEN_CREATION_FORMAT).to_string(),
            token_duration: grant.expires_in,
        };
        Self::persist(&self.path, &refreshed).await?;
        self.credentials = refreshed;

        Ok(&self.credentials.token)
    }

    /// Writes a credentials record to the store, pretty-printed, replacing
    /// the previous content wholesale.
    pub async fn persist(path: &Path, credentials: &Credentials) -> Result<(), ApiError> {
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| ApiError::CredentialsUnavailable(e.to_string()))?;
        }

        let json = serde_json::to_string_pretty(credentials)
            .map_err(|e| ApiError::CredentialsUnavailable(e.to_string()))?;
        async_fs::write(path, json)
            .await
            .map_err(|e| ApiError::CredentialsUnavailable(e.to_string()))
    }

    /// The current bearer token, exposed by reference for the duration of
    /// one request.
    pub fn token(&self) -> &str {
        &self.credentials.token
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }
}
