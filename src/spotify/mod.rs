//! # Spotify Integration Module
//!
//! This module implements the client side of the Spotify Web API for the
//! client-credentials flow: building authenticated requests, classifying
//! HTTP outcomes, transparently refreshing a rejected token, and assembling
//! paginated search results.
//!
//! ## Architecture
//!
//! ```text
//! Application Layer (CLI)
//!          ↓
//! Query Operations
//!     ├── Search (client-side pagination past the 50-item cap)
//!     └── Catalog lookups (artist, albums, tracks, audio features/analysis)
//!          ↓
//! Request Executor ([`SpotifyClient`])
//!     ├── Bearer-authenticated GET requests
//!     ├── Uniform status classification (200/401/403/429/other)
//!     └── One-shot refresh-and-retry on 401
//!          ↓
//! Token Manager ([`crate::management::TokenManager`])
//!          ↓
//! HTTP Layer (reqwest, JSON)
//! ```
//!
//! ## Retry policy
//!
//! The only internal retry is the 401 path: when the API rejects the token
//! and the token manager agrees it is stale, the token is refreshed and the
//! request is repeated exactly once. 403 (scope/key problem), 429 (rate
//! limit) and 5xx are surfaced immediately; backoff is a caller decision.
//!
//! ## Error types
//!
//! Every operation returns [`crate::error::ApiError`]; see that module for
//! the full taxonomy.

mod catalog;
mod client;
mod search;

pub use client::{ClientConfig, SpotifyClient};
pub use search::SEARCH_PAGE_CAP;
