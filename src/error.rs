//! Error taxonomy shared by the token manager, the request executor and all
//! catalog operations.
//!
//! Every public operation returns a typed error from this module; nothing
//! panics across the query boundary. Callers decide whether to retry on
//! [`ApiError::RateLimited`] or [`ApiError::TransportFailure`] - the only
//! retry performed internally is the one-shot refresh-and-retry on a 401.

use thiserror::Error;

/// Errors surfaced by the Spotify client and token manager.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The credentials store is missing, unreadable or malformed. Fatal at
    /// client construction; also raised when a refreshed record cannot be
    /// persisted back to the store.
    #[error("credentials store unavailable: {0}")]
    CredentialsUnavailable(String),

    /// A network or connect-level failure before an HTTP status was received.
    #[error("transport failure: {0}")]
    TransportFailure(#[from] reqwest::Error),

    /// The API rejected the credentials (401/403) or the token exchange
    /// failed. 403 is a scope or key problem and is never retried.
    #[error("authorization failed: {0}")]
    AuthFailure(String),

    /// The app exceeded its rate limits (429). No backoff happens at this
    /// layer; the caller owns that policy.
    #[error("rate limited by the API")]
    RateLimited,

    /// A 200 response whose body could not be decoded or is missing the
    /// expected top-level keys. Surfaced as a distinct bad-contract error,
    /// never silently defaulted.
    #[error("unexpected response shape: {0}")]
    UnexpectedResponseShape(String),

    /// Any other non-success HTTP status.
    #[error("request failed with status {0}")]
    RequestFailed(u16),
}

/// Errors surfaced by the external download delegate.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// The downloader process could not be spawned or the output directory
    /// could not be created.
    #[error("failed to invoke downloader: {0}")]
    Io(#[from] std::io::Error),

    /// The downloader ran but exited with a non-zero status.
    #[error("downloader exited with status {0}")]
    ProcessFailed(i32),

    /// The downloader reported success but the expected file is absent.
    #[error("downloader finished but {0} does not exist")]
    OutputMissing(String),
}
