#![allow(dead_code)] // each test binary uses a different subset of helpers

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};

use chrono::Utc;
use spotkit::spotify::ClientConfig;
use spotkit::types::{Credentials, TOKEN_CREATION_FORMAT};

static COUNTER: AtomicU32 = AtomicU32::new(0);

/// Unique per-test path under the system temp directory, so client instances
/// never share a credentials store.
pub fn temp_path(tag: &str) -> PathBuf {
    let n = COUNTER.fetch_add(1, Ordering::SeqCst);
    std::env::temp_dir().join(format!("spotkit-test-{}-{}-{}", tag, std::process::id(), n))
}

pub fn timestamp_secs_ago(secs: i64) -> String {
    (Utc::now() - chrono::Duration::seconds(secs))
        .format(TOKEN_CREATION_FORMAT)
        .to_string()
}

/// Credentials record with the client key base64("test:test").
pub fn credentials(token: &str, created_secs_ago: i64, duration: u64) -> Credentials {
    Credentials {
        client_key: "dGVzdDp0ZXN0".to_string(),
        token: token.to_string(),
        token_creation: timestamp_secs_ago(created_secs_ago),
        token_duration: duration,
    }
}

pub async fn write_store(path: &Path, credentials: &Credentials) {
    let json = serde_json::to_string_pretty(credentials).unwrap();
    async_fs::write(path, json).await.unwrap();
}

/// Client configuration pointing both endpoints at a mock server.
pub fn client_config(server_uri: &str, store: &Path) -> ClientConfig {
    ClientConfig {
        api_url: server_uri.to_string(),
        token_url: format!("{}/api/token", server_uri),
        credentials_path: store.to_path_buf(),
        force_refresh: false,
    }
}
